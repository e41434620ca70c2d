//! # Tabular Import
//!
//! Builds [`Stream`]s from the loosely-structured comma-separated text that EEG
//! amplifier software exports:
//!
//! ```text
//! Fp1,Fp2,Cz
//! 12.1,-3.4,0.5
//! 11.8,-3.9,0.7
//! ```
//!
//! - The first non-blank line holds electrode symbols, resolved with
//!   [`electrode::resolve`](crate::electrode::resolve).
//! - Every following non-blank line holds one sample per column.
//! - Within a data field only digits, `.` and `-` are kept before parsing, so stray
//!   units, quotes and whitespace are tolerated (`"12.5 uV"` reads as `12.5`).
//! - Commas are never escaped.
//!
//! Any unrecognized symbol, unparsable field or short/long row aborts the whole
//! import; no partial stream set is ever returned.

mod error;

#[cfg(test)]
mod tests;

pub use error::ImportError;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use crate::document::{DocumentContents, Stream};
use crate::electrode::{resolve, Electrode};

/// Import streams from tabular text.
///
/// Stream order matches header column order; each stream gets a fresh identifier.
/// Input without any non-blank line yields no streams.
pub fn import_streams(text: &str) -> Result<Vec<Stream>, ImportError> {
    import_streams_from_reader(text.as_bytes())
}

/// Import streams from a tabular text file
pub fn import_streams_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Stream>, ImportError> {
    let file = File::open(path)?;
    import_streams_from_reader(BufReader::new(file))
}

/// Import streams from any reader of tabular text
pub fn import_streams_from_reader<R: Read>(reader: R) -> Result<Vec<Stream>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut electrodes: Option<Vec<Electrode>> = None;
    let mut columns: Vec<Vec<f64>> = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut scratch = String::new();

    while csv_reader.read_record(&mut record)? {
        if is_blank(&record) {
            continue;
        }
        let row = record.position().map_or(0, |p| p.line() as usize);

        if electrodes.is_none() {
            let header = record
                .iter()
                .map(|symbol| {
                    resolve(symbol)
                        .map_err(|_| ImportError::UnrecognizedElectrode(symbol.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            columns = vec![Vec::new(); header.len()];
            electrodes = Some(header);
            continue;
        }

        if record.len() != columns.len() {
            return Err(ImportError::RowColumnMismatch {
                row,
                expected: columns.len(),
                found: record.len(),
            });
        }

        for (index, (field, samples)) in record.iter().zip(columns.iter_mut()).enumerate() {
            let value = parse_sample(field, &mut scratch).ok_or(ImportError::MalformedSample {
                row,
                column: index + 1,
            })?;
            samples.push(value);
        }
    }

    let streams: Vec<Stream> = electrodes
        .unwrap_or_default()
        .into_iter()
        .zip(columns)
        .map(|(electrode, samples)| Stream::new(electrode, samples))
        .collect();

    debug!(
        "Imported {} streams x {} samples",
        streams.len(),
        streams.first().map_or(0, Stream::len)
    );

    Ok(streams)
}

/// Import tabular text straight into a document with the given sample rate
pub fn import_document(text: &str, sample_rate: f64) -> Result<DocumentContents, ImportError> {
    let streams = import_streams(text)?;
    Ok(DocumentContents::new(sample_rate, streams)?)
}

/// Import a tabular text file straight into a document with the given sample rate
pub fn import_document_from_path<P: AsRef<Path>>(
    path: P,
    sample_rate: f64,
) -> Result<DocumentContents, ImportError> {
    let streams = import_streams_from_path(path)?;
    Ok(DocumentContents::new(sample_rate, streams)?)
}

/// Trimmed blank lines come through as a single empty field
fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(str::is_empty) && record.len() <= 1
}

/// Parse a data field after dropping everything but digits, `.` and `-`
fn parse_sample(field: &str, scratch: &mut String) -> Option<f64> {
    scratch.clear();
    scratch.extend(
        field
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-'),
    );
    scratch.parse().ok()
}
