/// Errors raised when a document would violate its invariants
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentError {
    /// Sample rate is zero, negative or not finite
    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(f64),

    /// A stream's length differs from the document-wide sample count
    #[error("Stream {electrode} has {found} samples, expected {expected}")]
    SampleCountMismatch {
        /// Symbol of the offending stream's electrode
        electrode: String,
        /// Document-wide sample count
        expected: usize,
        /// Length of the offending stream
        found: usize,
    },

    /// A stream holds a NaN sample
    #[error("Stream {electrode} has a NaN sample at index {index}")]
    NanSample {
        /// Symbol of the offending stream's electrode
        electrode: String,
        /// Index of the first NaN sample
        index: usize,
    },

    /// An event marker points past the end of the recording
    #[error("Event {event_type:?} at sample {index} is outside the recording ({sample_count} samples)")]
    EventOutOfRange {
        /// Event type tag
        event_type: String,
        /// Offending sample index
        index: usize,
        /// Document-wide sample count (0 when there are no streams)
        sample_count: usize,
    },

    /// Epoch length of zero samples
    #[error("Epoch length must be at least one sample")]
    EpochLengthZero,
}
