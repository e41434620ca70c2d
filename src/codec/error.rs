/// Errors that can occur while encoding or decoding documents
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The data was written by a format version this build cannot read
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u16),

    /// The data is truncated or structurally invalid
    #[error("Corrupted document data: {0}")]
    CorruptedData(String),

    /// The encoder configuration cannot be used for this document
    #[error("Invalid codec configuration: {0}")]
    InvalidConfig(String),

    /// I/O error reading or writing a document file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CodecError {
    pub(super) fn corrupted(reason: impl Into<String>) -> Self {
        CodecError::CorruptedData(reason.into())
    }
}
