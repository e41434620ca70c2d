//! # Document Contents
//!
//! The in-memory aggregate for one recording: ordered sample [`Stream`]s, the
//! sample rate, subject metadata, typed [`EventMarkers`] and an optional epoch
//! length.
//!
//! ## Invariants
//!
//! - The sample rate is finite and strictly positive.
//! - Every stream has the same number of samples.
//! - No sample is NaN, so document equality is plain value equality.
//! - Every event index is below that sample count.
//! - An epoch length, when set, is at least one sample.
//!
//! They are checked whenever a value enters the aggregate (construction,
//! [`DocumentContents::push_stream`], [`DocumentContents::insert_event`], import and
//! decode), so derived quantities never have to re-validate.
//!
//! Derived quantities (`sample_count`, `duration`, `potential_range`, `prefixes`) are
//! computed on demand from the owned collections and never cached.

mod builder;
mod error;
mod events;
mod stream;
mod summary;


pub use builder::DocumentBuilder;
pub use error::DocumentError;
pub use events::{Event, EventMarkers};
pub use stream::{Stream, StreamId};
pub use summary::DocumentSummary;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::electrode::Prefix;

/// Seconds elapsed at a sample index.
///
/// This is the single index-to-time mapping of the crate; the query engine, the
/// summary and [`DocumentContents::time`] all go through it.
#[inline]
pub fn time_at(index: usize, sample_rate: f64) -> f64 {
    index as f64 * (1.0 / sample_rate)
}

/// Document identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Fresh random identifier
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Rebuild an identifier from its 16 stored bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// The 16 raw bytes of the identifier
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Smallest and largest sample value across all streams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialRange {
    /// Smallest sample value
    pub min: f64,
    /// Largest sample value
    pub max: f64,
}

/// One recording: streams, sample rate, metadata, events and epoch length
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentContents {
    id: DocumentId,
    subject: Option<String>,
    info: Option<String>,
    sample_rate: f64,
    streams: Vec<Stream>,
    events: EventMarkers,
    epoch_length: Option<usize>,
}

impl DocumentContents {
    /// Create a document from streams sharing one sample count.
    ///
    /// # Errors
    /// [`DocumentError::InvalidSampleRate`], [`DocumentError::SampleCountMismatch`] or
    /// [`DocumentError::NanSample`].
    pub fn new(sample_rate: f64, streams: Vec<Stream>) -> Result<Self, DocumentError> {
        validate_sample_rate(sample_rate)?;
        validate_uniform_length(&streams)?;
        Ok(Self {
            id: DocumentId::new_v4(),
            subject: None,
            info: None,
            sample_rate,
            streams,
            events: EventMarkers::new(),
            epoch_length: None,
        })
    }

    /// Start building a document with the given sample rate in Hz
    pub fn builder(sample_rate: f64) -> DocumentBuilder {
        DocumentBuilder::new(sample_rate)
    }

    /// Document identifier
    #[inline]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Subject description
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Replace the subject description
    pub fn set_subject(&mut self, subject: Option<String>) {
        self.subject = subject;
    }

    /// Free-text recording info
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// Replace the recording info
    pub fn set_info(&mut self, info: Option<String>) {
        self.info = info;
    }

    /// Sample rate in Hz
    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Streams in display order
    #[inline]
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    /// Look up a stream by identifier
    pub fn stream(&self, id: StreamId) -> Option<&Stream> {
        self.streams.iter().find(|stream| stream.id() == id)
    }

    /// Event markers
    #[inline]
    pub fn events(&self) -> &EventMarkers {
        &self.events
    }

    /// Epoch length in samples
    #[inline]
    pub fn epoch_length(&self) -> Option<usize> {
        self.epoch_length
    }

    /// Append a stream.
    ///
    /// # Errors
    /// [`DocumentError::SampleCountMismatch`] if the document already has streams of
    /// a different length, [`DocumentError::NanSample`] if a sample is NaN.
    pub fn push_stream(&mut self, stream: Stream) -> Result<(), DocumentError> {
        if let Some(expected) = self.sample_count() {
            check_length(&stream, expected)?;
        }
        check_samples(&stream)?;
        self.streams.push(stream);
        Ok(())
    }

    /// Replace every stream at once.
    ///
    /// Existing events must still fall inside the new recording.
    pub fn replace_streams(&mut self, streams: Vec<Stream>) -> Result<(), DocumentError> {
        validate_uniform_length(&streams)?;
        let sample_count = streams.first().map_or(0, Stream::len);
        if let Some(event) = self.events.iter().find(|e| e.sample_index >= sample_count) {
            return Err(DocumentError::EventOutOfRange {
                event_type: event.event_type,
                index: event.sample_index,
                sample_count,
            });
        }
        self.streams = streams;
        Ok(())
    }

    /// Add an event marker. Returns false if it was already present.
    ///
    /// # Errors
    /// [`DocumentError::EventOutOfRange`] unless `sample_index < sample_count`.
    pub fn insert_event(
        &mut self,
        event_type: &str,
        sample_index: usize,
    ) -> Result<bool, DocumentError> {
        let sample_count = self.sample_count().unwrap_or(0);
        if sample_index >= sample_count {
            return Err(DocumentError::EventOutOfRange {
                event_type: event_type.to_string(),
                index: sample_index,
                sample_count,
            });
        }
        Ok(self.events.insert(event_type, sample_index))
    }

    /// Remove an event marker. Returns true if it was present.
    pub fn remove_event(&mut self, event_type: &str, sample_index: usize) -> bool {
        self.events.remove(event_type, sample_index)
    }

    /// Set or clear the epoch length.
    ///
    /// # Errors
    /// [`DocumentError::EpochLengthZero`] for `Some(0)`.
    pub fn set_epoch_length(&mut self, epoch_length: Option<usize>) -> Result<(), DocumentError> {
        if epoch_length == Some(0) {
            return Err(DocumentError::EpochLengthZero);
        }
        self.epoch_length = epoch_length;
        Ok(())
    }

    /// Samples per stream, or `None` when there are no streams
    pub fn sample_count(&self) -> Option<usize> {
        self.streams.first().map(Stream::len)
    }

    /// Recording duration in seconds, or `None` when there are no streams
    pub fn duration(&self) -> Option<f64> {
        self.sample_count()
            .map(|count| time_at(count, self.sample_rate))
    }

    /// Seconds elapsed at a sample index
    #[inline]
    pub fn time(&self, at: usize) -> f64 {
        time_at(at, self.sample_rate)
    }

    /// Smallest and largest sample across all streams, or `None` without samples
    pub fn potential_range(&self) -> Option<PotentialRange> {
        let mut samples = self.streams.iter().flat_map(|s| s.samples().iter().copied());
        let first = samples.next()?;
        let (min, max) = samples.fold((first, first), |(min, max), v| (min.min(v), max.max(v)));
        Some(PotentialRange { min, max })
    }

    /// Distinct electrode prefixes, in natural order
    pub fn prefixes(&self) -> Vec<Prefix> {
        self.streams
            .iter()
            .map(|stream| stream.electrode().prefix())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Streams ordered by prefix, then suffix. Equal electrodes keep document order.
    pub fn sorted_streams(&self) -> Vec<&Stream> {
        let mut sorted: Vec<&Stream> = self.streams.iter().collect();
        sorted.sort_by_key(|stream| stream.electrode());
        sorted
    }

    /// Events whose type is among `active_types`, by type then ascending index
    pub fn events_of_types<S: AsRef<str>>(&self, active_types: &[S]) -> Vec<Event> {
        self.events
            .filtered(|event_type| active_types.iter().any(|t| t.as_ref() == event_type))
    }
}

fn validate_sample_rate(sample_rate: f64) -> Result<(), DocumentError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(DocumentError::InvalidSampleRate(sample_rate))
    }
}

fn validate_uniform_length(streams: &[Stream]) -> Result<(), DocumentError> {
    let Some(expected) = streams.first().map(Stream::len) else {
        return Ok(());
    };
    streams.iter().try_for_each(|stream| {
        check_length(stream, expected)?;
        check_samples(stream)
    })
}

fn check_samples(stream: &Stream) -> Result<(), DocumentError> {
    match stream.samples().iter().position(|v| v.is_nan()) {
        Some(index) => Err(DocumentError::NanSample {
            electrode: stream.electrode().symbol(),
            index,
        }),
        None => Ok(()),
    }
}

fn check_length(stream: &Stream, expected: usize) -> Result<(), DocumentError> {
    if stream.len() == expected {
        Ok(())
    } else {
        Err(DocumentError::SampleCountMismatch {
            electrode: stream.electrode().symbol(),
            expected,
            found: stream.len(),
        })
    }
}
