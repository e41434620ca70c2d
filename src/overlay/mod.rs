//! # Event and Epoch Overlays
//!
//! Maps event sample indices to positions relative to the visible recording, as a
//! proportion of the sample count:
//!
//! - event marker: `(sample_index + 1) / sample_count`
//! - epoch end: `(epoch_length + sample_index + 1) / sample_count`
//!
//! Values are returned as computed. An epoch running past the end of the recording
//! yields a proportion above `1.0`; use [`EventOverlay::clamped`] when a drawing
//! surface needs `[0, 1]`.
//!
//! ```rust
//! use eegdoc::overlay::{epoch_end_proportion, event_proportion};
//!
//! assert_eq!(event_proportion(100, 99), Some(1.0));
//! assert_eq!(epoch_end_proportion(100, 49, 25), Some(0.75));
//! assert_eq!(event_proportion(0, 0), None);
//! ```

use serde::{Deserialize, Serialize};

use crate::document::{DocumentContents, Event};

/// Position of an event marker, or `None` for an empty recording
#[inline]
pub fn event_proportion(sample_count: usize, sample_index: usize) -> Option<f64> {
    if sample_count == 0 {
        return None;
    }
    Some((sample_index as f64 + 1.0) / sample_count as f64)
}

/// Position of the end of the epoch following an event, or `None` for an empty recording
#[inline]
pub fn epoch_end_proportion(
    sample_count: usize,
    sample_index: usize,
    epoch_length: usize,
) -> Option<f64> {
    if sample_count == 0 {
        return None;
    }
    Some((epoch_length as f64 + sample_index as f64 + 1.0) / sample_count as f64)
}

/// Overlay geometry for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOverlay {
    /// Event type
    pub event_type: String,
    /// Sample index of the event
    pub sample_index: usize,
    /// See [`event_proportion`]
    pub event_proportion: f64,
    /// See [`epoch_end_proportion`]; only present when epochs are shown
    pub epoch_end_proportion: Option<f64>,
}

impl EventOverlay {
    /// Same overlay with both proportions limited to `[0, 1]`
    pub fn clamped(&self) -> Self {
        Self {
            event_type: self.event_type.clone(),
            sample_index: self.sample_index,
            event_proportion: self.event_proportion.clamp(0.0, 1.0),
            epoch_end_proportion: self.epoch_end_proportion.map(|p| p.clamp(0.0, 1.0)),
        }
    }
}

/// Overlays for an already-filtered event list.
///
/// Epoch ends are computed only when `show_epochs` is set and an epoch length is
/// known. An empty recording has nothing to overlay and yields an empty list.
pub fn overlays<'a, I>(
    events: I,
    sample_count: usize,
    epoch_length: Option<usize>,
    show_epochs: bool,
) -> Vec<EventOverlay>
where
    I: IntoIterator<Item = &'a Event>,
{
    let epoch_length = epoch_length.filter(|_| show_epochs);
    events
        .into_iter()
        .filter_map(|event| {
            let position = event_proportion(sample_count, event.sample_index)?;
            Some(EventOverlay {
                event_type: event.event_type.clone(),
                sample_index: event.sample_index,
                event_proportion: position,
                epoch_end_proportion: epoch_length
                    .and_then(|len| epoch_end_proportion(sample_count, event.sample_index, len)),
            })
        })
        .collect()
}

/// Overlays for the document's events of the given types, using its epoch length
pub fn document_overlays<S: AsRef<str>>(
    doc: &DocumentContents,
    active_types: &[S],
    show_epochs: bool,
) -> Vec<EventOverlay> {
    overlays(
        &doc.events_of_types(active_types),
        doc.sample_count().unwrap_or(0),
        doc.epoch_length(),
        show_epochs,
    )
}
