use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A single typed marker at a sample index
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Free-text type tag (e.g. "stimulus", "R128")
    pub event_type: String,
    /// Zero-based sample index the event belongs to
    pub sample_index: usize,
}

impl Event {
    /// Create a new event
    pub fn new(event_type: impl Into<String>, sample_index: usize) -> Self {
        Self {
            event_type: event_type.into(),
            sample_index,
        }
    }
}

/// Event markers grouped by type.
///
/// Types iterate in lexical order and indices within a type ascend; insertion
/// order is not kept. A type never maps to an empty index set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMarkers {
    by_type: BTreeMap<String, BTreeSet<usize>>,
}

impl EventMarkers {
    /// Create an empty marker set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker. Returns false if it was already present.
    ///
    /// Range checking against the recording happens in
    /// [`DocumentContents::insert_event`](super::DocumentContents::insert_event).
    pub(crate) fn insert(&mut self, event_type: &str, sample_index: usize) -> bool {
        self.by_type
            .entry(event_type.to_string())
            .or_default()
            .insert(sample_index)
    }

    /// Remove a marker. Returns true if it was present.
    pub fn remove(&mut self, event_type: &str, sample_index: usize) -> bool {
        let Some(indices) = self.by_type.get_mut(event_type) else {
            return false;
        };
        let removed = indices.remove(&sample_index);
        if indices.is_empty() {
            self.by_type.remove(event_type);
        }
        removed
    }

    /// Returns true if the marker is present
    pub fn contains(&self, event_type: &str, sample_index: usize) -> bool {
        self.by_type
            .get(event_type)
            .is_some_and(|indices| indices.contains(&sample_index))
    }

    /// Distinct event types, in lexical order
    pub fn types(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_type.keys().map(String::as_str)
    }

    /// Ascending sample indices of one event type
    pub fn indices(&self, event_type: &str) -> impl Iterator<Item = usize> + '_ {
        self.by_type
            .get(event_type)
            .into_iter()
            .flat_map(|indices| indices.iter().copied())
    }

    /// All events, by type then ascending index
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.by_type.iter().flat_map(|(event_type, indices)| {
            indices
                .iter()
                .map(move |&sample_index| Event::new(event_type.as_str(), sample_index))
        })
    }

    /// Events whose type passes the filter, by type then ascending index
    pub fn filtered<F>(&self, mut keep_type: F) -> Vec<Event>
    where
        F: FnMut(&str) -> bool,
    {
        self.by_type
            .iter()
            .filter(|(event_type, _)| keep_type(event_type))
            .flat_map(|(event_type, indices)| {
                indices
                    .iter()
                    .map(move |&sample_index| Event::new(event_type.as_str(), sample_index))
            })
            .collect()
    }

    /// Number of markers per type
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.by_type
            .iter()
            .map(|(event_type, indices)| (event_type.clone(), indices.len()))
            .collect()
    }

    /// Number of distinct event types
    pub fn type_count(&self) -> usize {
        self.by_type.len()
    }

    /// Total number of markers across all types
    pub fn len(&self) -> usize {
        self.by_type.values().map(BTreeSet::len).sum()
    }

    /// Returns true if there are no markers
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Largest sample index of any marker
    pub fn max_index(&self) -> Option<usize> {
        self.by_type
            .values()
            .filter_map(|indices| indices.last().copied())
            .max()
    }
}
