//! # Tabular Export
//!
//! Writes a document back to the comma-separated text format the importer reads:
//! one header line of canonical electrode symbols in stream order, then one line
//! per sample index.
//!
//! Values use Rust's shortest round-trip float formatting, so importing the output
//! reproduces every finite sample exactly.

use std::io::Write;

use log::debug;

use crate::document::DocumentContents;

/// Errors that can occur while exporting tabular text
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV writer error
    #[error("CSV writing error: {0}")]
    CsvError(#[from] csv::Error),

    /// I/O error writing the output
    #[error("Failed to write output: {0}")]
    IoError(#[from] std::io::Error),
}

/// Render a document as tabular text
pub fn export_tabular(doc: &DocumentContents) -> Result<String, ExportError> {
    let mut out = Vec::new();
    export_tabular_to_writer(doc, &mut out)?;
    // Symbols and formatted floats are ASCII
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Write a document as tabular text to any writer
pub fn export_tabular_to_writer<W: Write>(
    doc: &DocumentContents,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    let streams = doc.streams();
    if streams.is_empty() {
        csv_writer.flush()?;
        return Ok(());
    }

    csv_writer.write_record(streams.iter().map(|s| s.electrode().symbol()))?;

    let mut row: Vec<String> = vec![String::new(); streams.len()];
    let sample_count = doc.sample_count().unwrap_or(0);
    for index in 0..sample_count {
        for (field, stream) in row.iter_mut().zip(streams) {
            field.clear();
            format_sample(field, stream.samples()[index]);
        }
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;

    debug!(
        "Exported {} streams x {} samples",
        streams.len(),
        sample_count
    );
    Ok(())
}

fn format_sample(field: &mut String, value: f64) {
    use std::fmt::Write as _;
    // Writing to a String cannot fail
    let _ = write!(field, "{}", value);
}
