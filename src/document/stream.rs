use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::electrode::Electrode;

/// Opaque stream identity, stable for the lifetime of its document.
///
/// Presentation code keys selection sets on this rather than on the electrode,
/// since a recording may carry the same electrode twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(Uuid);

impl StreamId {
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

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One electrode's ordered sequence of potential readings
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    id: StreamId,
    electrode: Electrode,
    samples: Vec<f64>,
}

impl Stream {
    /// Create a stream with a fresh identifier
    pub fn new(electrode: Electrode, samples: Vec<f64>) -> Self {
        Self::with_id(StreamId::new_v4(), electrode, samples)
    }

    /// Create a stream with a known identifier (e.g. when decoding a stored document)
    pub fn with_id(id: StreamId, electrode: Electrode, samples: Vec<f64>) -> Self {
        Self {
            id,
            electrode,
            samples,
        }
    }

    /// Stream identifier
    #[inline]
    pub fn id(&self) -> StreamId {
        self.id
    }

    /// Electrode this stream was recorded from
    #[inline]
    pub fn electrode(&self) -> Electrode {
        self.electrode
    }

    /// Sample values, in recording order
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the stream holds no samples
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consume the stream, returning its samples
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}
