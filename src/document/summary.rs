use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DocumentContents, PotentialRange};
use crate::electrode::Prefix;

/// Overview of a document, for inspection tools and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document identifier
    pub id: String,
    /// Subject description, if any
    pub subject: Option<String>,
    /// Number of streams
    pub stream_count: usize,
    /// Samples per stream (absent without streams)
    pub sample_count: Option<usize>,
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Recording duration in seconds
    pub duration: Option<f64>,
    /// Smallest and largest sample value
    pub potential_range: Option<PotentialRange>,
    /// Distinct electrode regions, in natural order
    pub prefixes: Vec<Prefix>,
    /// Number of markers per event type
    pub event_counts: BTreeMap<String, usize>,
    /// Epoch length in samples
    pub epoch_length: Option<usize>,
}

impl DocumentContents {
    /// Summarize the document
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id.to_string(),
            subject: self.subject.clone(),
            stream_count: self.streams.len(),
            sample_count: self.sample_count(),
            sample_rate: self.sample_rate,
            duration: self.duration(),
            potential_range: self.potential_range(),
            prefixes: self.prefixes(),
            event_counts: self.events.counts(),
            epoch_length: self.epoch_length,
        }
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} streams x {} samples at {} Hz",
            self.stream_count,
            self.sample_count.unwrap_or(0),
            self.sample_rate
        )?;
        if let Some(duration) = self.duration {
            write!(f, " ({:.3} s)", duration)?;
        }
        let events: usize = self.event_counts.values().sum();
        if events > 0 {
            write!(f, ", {} events in {} types", events, self.event_counts.len())?;
        }
        Ok(())
    }
}
