//! # Windowed Sample Queries
//!
//! Turns streams into chart-ready `(electrode, timestamp, potential)` points for an
//! optional half-open window of sample indices. This is re-run on every change of
//! the visible window, so it works on borrowed sub-slices of the sample arrays and
//! never copies them.
//!
//! ## Ordering
//!
//! Points are stream-major in the order the caller supplies the streams, then
//! index-ascending within a stream. There is no chronological merge across streams;
//! consumers grouping by electrode rely on this order.
//!
//! ## Windows past the end of data
//!
//! The upper bound is clamped to each stream's length, and a lower bound past the
//! end simply yields nothing. Windows never cause an error.
//!
//! ```rust
//! use eegdoc::import::import_document;
//! use eegdoc::query::sample_points;
//!
//! let doc = import_document("Fp1,Fp2\n1,2\n3,4\n5,6\n", 2.0)?;
//! let points = sample_points(doc.streams(), doc.sample_rate(), Some(1..10));
//! assert_eq!(points.len(), 4);
//! assert_eq!(points[0].timestamp, 0.5);
//! assert_eq!(points[0].potential, 3.0);
//! # Ok::<(), eegdoc::import::ImportError>(())
//! ```


use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::document::{time_at, Stream};
use crate::electrode::Electrode;

/// One chart-ready sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// Electrode of the stream the sample came from
    pub electrode: Electrode,
    /// Seconds since the start of the recording
    pub timestamp: f64,
    /// Sample value
    pub potential: f64,
}

/// Indices actually visited for a stream of `len` samples.
///
/// Without a window this is `0..len`; otherwise `window.start..min(len, window.end)`,
/// collapsed to an empty range when the window starts past the end.
#[inline]
pub fn clamp_window(window: Option<&Range<usize>>, len: usize) -> Range<usize> {
    match window {
        None => 0..len,
        Some(window) => {
            let end = window.end.min(len);
            window.start.min(end)..end
        }
    }
}

/// Collect the points of `streams` (in the given order) inside `window`.
pub fn sample_points<'a, I>(
    streams: I,
    sample_rate: f64,
    window: Option<Range<usize>>,
) -> Vec<SamplePoint>
where
    I: IntoIterator<Item = &'a Stream>,
{
    let streams: Vec<&Stream> = streams.into_iter().collect();
    let total = streams
        .iter()
        .map(|stream| clamp_window(window.as_ref(), stream.len()).len())
        .sum();

    let mut points = Vec::with_capacity(total);
    for stream in streams {
        extend_stream_points(&mut points, stream, sample_rate, window.as_ref());
    }
    points
}

/// Lazily iterate the points of `streams` inside `window`.
///
/// Yields exactly what [`sample_points`] returns, without allocating the result.
pub fn iter_sample_points<'a, I>(
    streams: I,
    sample_rate: f64,
    window: Option<Range<usize>>,
) -> SamplePoints<'a, I::IntoIter>
where
    I: IntoIterator<Item = &'a Stream>,
{
    SamplePoints {
        streams: streams.into_iter(),
        sample_rate,
        window,
        current: None,
    }
}

/// Collect the points of `streams` inside `window`, one rayon task per stream.
///
/// The result is identical to [`sample_points`] for the same arguments.
#[cfg(feature = "parallel")]
pub fn par_sample_points(
    streams: &[&Stream],
    sample_rate: f64,
    window: Option<Range<usize>>,
) -> Vec<SamplePoint> {
    use rayon::prelude::*;

    streams
        .par_iter()
        .map(|stream| {
            let mut points = Vec::new();
            extend_stream_points(&mut points, stream, sample_rate, window.as_ref());
            points
        })
        .collect::<Vec<_>>()
        .concat()
}

fn extend_stream_points(
    points: &mut Vec<SamplePoint>,
    stream: &Stream,
    sample_rate: f64,
    window: Option<&Range<usize>>,
) {
    let bounds = clamp_window(window, stream.len());
    let start = bounds.start;
    let electrode = stream.electrode();
    points.extend(
        stream.samples()[bounds]
            .iter()
            .enumerate()
            .map(|(offset, &potential)| SamplePoint {
                electrode,
                timestamp: time_at(start + offset, sample_rate),
                potential,
            }),
    );
}

/// Iterator returned by [`iter_sample_points`]
#[derive(Debug, Clone)]
pub struct SamplePoints<'a, I> {
    streams: I,
    sample_rate: f64,
    window: Option<Range<usize>>,
    current: Option<Cursor<'a>>,
}

#[derive(Debug, Clone)]
struct Cursor<'a> {
    electrode: Electrode,
    samples: &'a [f64],
    indices: Range<usize>,
}

impl<'a, I> Iterator for SamplePoints<'a, I>
where
    I: Iterator<Item = &'a Stream>,
{
    type Item = SamplePoint;

    fn next(&mut self) -> Option<SamplePoint> {
        loop {
            if let Some(cursor) = &mut self.current {
                if let Some(index) = cursor.indices.next() {
                    return Some(SamplePoint {
                        electrode: cursor.electrode,
                        timestamp: time_at(index, self.sample_rate),
                        potential: cursor.samples[index],
                    });
                }
            }

            let stream = self.streams.next()?;
            self.current = Some(Cursor {
                electrode: stream.electrode(),
                samples: stream.samples(),
                indices: clamp_window(self.window.as_ref(), stream.len()),
            });
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.current.as_ref().map_or(0, |c| c.indices.len());
        (remaining, None)
    }
}
