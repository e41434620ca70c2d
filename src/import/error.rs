use crate::document::DocumentError;

/// Errors that can occur while importing tabular text.
///
/// Import is all-or-nothing: any of these discards every stream parsed so far.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// A header field is not a recognized electrode symbol
    #[error("Unrecognized electrode in header: {0:?}")]
    UnrecognizedElectrode(String),

    /// A data field does not parse as a number
    #[error("Malformed sample at line {row}, column {column}")]
    MalformedSample {
        /// 1-based line number in the input
        row: usize,
        /// 1-based field index
        column: usize,
    },

    /// A data row has a different number of fields than the header
    #[error("Line {row} has {found} fields, header has {expected}")]
    RowColumnMismatch {
        /// 1-based line number in the input
        row: usize,
        /// Number of header fields
        expected: usize,
        /// Number of fields on the offending line
        found: usize,
    },

    /// Low-level CSV reader error (e.g. invalid UTF-8)
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// I/O error reading the input file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Imported streams do not form a valid document
    #[error("Invalid document: {0}")]
    DocumentError(#[from] DocumentError),
}
