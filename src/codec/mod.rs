//! # Compact Binary Codec
//!
//! Lossless transform between [`DocumentContents`] and the `.eegd` byte layout.
//!
//! ## Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! +--------------------------------------------------------------+
//! | header (84 bytes)                                            |
//! |   magic "EEGD", version u16, sample encoding u8, decimals u8 |
//! |   sample count u64, sample rate f64, stream count u32        |
//! |   subject len u32, info len u32        (u32::MAX = absent)   |
//! |   epoch length u64                     (u64::MAX = absent)   |
//! |   event type count u32                                       |
//! |   payload len u64, compressed len u64, payload crc32 u32     |
//! |   document id [u8; 16]                                       |
//! +--------------------------------------------------------------+
//! | subject bytes, info bytes (UTF-8)                            |
//! +--------------------------------------------------------------+
//! | per stream: id [u8; 16], prefix code u8, suffix code u8      |
//! +--------------------------------------------------------------+
//! | zlib payload: event table, then samples (see `payload`)      |
//! +--------------------------------------------------------------+
//! ```
//!
//! Electrodes are stored as their prefix/suffix codes, never as text. The payload
//! is checked against its declared sizes and CRC-32 before anything is built from
//! it; decoding either yields a fully validated document or an error.
//!
//! ## Sample precision
//!
//! By default samples round-trip bit-for-bit. [`SampleEncoding::Quantized`] trades
//! precision for size: values come back within `0.5 * 10^-decimals`.
//!
//! ```rust
//! use eegdoc::codec::{decode, encode};
//! use eegdoc::import::import_document;
//!
//! let doc = import_document("Fp1,Fp2\n1.5,-2.25\n3.0,4.0\n", 256.0)?;
//! let bytes = encode(&doc)?;
//! assert_eq!(decode(&bytes)?, doc);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod header;
mod input;
mod payload;
mod profile;

#[cfg(test)]
mod tests;

pub use config::{CodecConfig, SampleEncoding, MAX_DECIMALS};
pub use error::CodecError;
pub use header::{FORMAT_VERSION, HEADER_LEN, MAGIC};
pub use profile::Profile;

use std::io::{Read, Write};
use std::path::Path;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};
use log::debug;

use crate::document::{DocumentContents, DocumentId, Stream, StreamId};
use crate::electrode::{Electrode, Prefix, Suffix};
use header::Header;
use input::Input;

/// File extension for encoded documents
pub const EXTENSION: &str = "eegd";

/// Bytes per stream record: id, prefix code, suffix code
const STREAM_RECORD_LEN: usize = 18;

/// Encode a document with the default configuration
pub fn encode(doc: &DocumentContents) -> Result<Vec<u8>, CodecError> {
    encode_with(doc, &CodecConfig::default())
}

/// Encode a document
pub fn encode_with(doc: &DocumentContents, config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    config.validate()?;

    let raw = payload::encode(doc, config.sample_encoding)?;
    let mut crc = Crc::new();
    crc.update(&raw);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(config.compression_level));
    encoder.write_all(&raw)?;
    let compressed = encoder.finish()?;

    let subject = doc.subject().map(str::as_bytes);
    let info = doc.info().map(str::as_bytes);
    let header = Header {
        sample_encoding: config.sample_encoding,
        sample_count: doc.sample_count().unwrap_or(0) as u64,
        sample_rate: doc.sample_rate(),
        stream_count: length_u32(doc.streams().len(), "stream count")?,
        subject_len: subject.map(|s| length_u32(s.len(), "subject")).transpose()?,
        info_len: info.map(|s| length_u32(s.len(), "info")).transpose()?,
        epoch_length: doc.epoch_length().map(epoch_u64).transpose()?,
        event_type_count: length_u32(doc.events().type_count(), "event type count")?,
        payload_len: raw.len() as u64,
        compressed_len: compressed.len() as u64,
        payload_crc: crc.sum(),
        document_id: *doc.id().as_bytes(),
    };

    let mut out = Vec::with_capacity(
        HEADER_LEN
            + subject.map_or(0, <[u8]>::len)
            + info.map_or(0, <[u8]>::len)
            + doc.streams().len() * STREAM_RECORD_LEN
            + compressed.len(),
    );
    header.write_to(&mut out)?;
    out.extend_from_slice(subject.unwrap_or_default());
    out.extend_from_slice(info.unwrap_or_default());
    for stream in doc.streams() {
        out.extend_from_slice(stream.id().as_bytes());
        out.push(stream.electrode().prefix().code());
        out.push(stream.electrode().suffix().code());
    }
    out.extend_from_slice(&compressed);

    debug!(
        "Encoded {} streams x {} samples: {} bytes ({} raw payload, ratio {:.2})",
        doc.streams().len(),
        header.sample_count,
        out.len(),
        raw.len(),
        raw.len() as f64 / compressed.len().max(1) as f64
    );

    Ok(out)
}

/// Decode a document.
///
/// # Errors
/// [`CodecError::UnsupportedVersion`] for data written by another format version,
/// [`CodecError::CorruptedData`] for anything truncated, inconsistent or invalid.
pub fn decode(bytes: &[u8]) -> Result<DocumentContents, CodecError> {
    let mut input = Input::new(bytes, "header");
    let header = Header::read_from(&mut input)?;

    input.enter("metadata");
    let subject = header
        .subject_len
        .map(|len| input.text(len as usize))
        .transpose()?;
    let info = header
        .info_len
        .map(|len| input.text(len as usize))
        .transpose()?;

    input.enter("stream table");
    let stream_count = header.stream_count as usize;
    let records = input.take_records(stream_count, STREAM_RECORD_LEN)?;
    let identities = records
        .chunks_exact(STREAM_RECORD_LEN)
        .map(read_stream_record)
        .collect::<Result<Vec<_>, _>>()?;

    let compressed = input.rest();
    if compressed.len() as u64 != header.compressed_len {
        return Err(CodecError::corrupted(format!(
            "payload holds {} bytes, header declares {}",
            compressed.len(),
            header.compressed_len
        )));
    }
    let raw = inflate(compressed, header.payload_len)?;
    let mut crc = Crc::new();
    crc.update(&raw);
    if crc.sum() != header.payload_crc {
        return Err(CodecError::corrupted("payload checksum mismatch"));
    }

    let sample_count = usize::try_from(header.sample_count)
        .map_err(|_| CodecError::corrupted("sample count does not fit in memory"))?;
    let payload = payload::decode(
        &raw,
        header.sample_encoding,
        header.event_type_count,
        stream_count,
        sample_count,
    )?;

    let mut builder = DocumentContents::builder(header.sample_rate)
        .id(DocumentId::from_bytes(header.document_id))
        .streams(
            identities
                .into_iter()
                .zip(payload.samples)
                .map(|((id, electrode), samples)| Stream::with_id(id, electrode, samples)),
        );
    if let Some(subject) = subject {
        builder = builder.subject(subject);
    }
    if let Some(info) = info {
        builder = builder.info(info);
    }
    if let Some(epoch_length) = header.epoch_length {
        let epoch_length = usize::try_from(epoch_length)
            .map_err(|_| CodecError::corrupted("epoch length does not fit in memory"))?;
        builder = builder.epoch_length(epoch_length);
    }
    for (event_type, indices) in payload.events {
        for index in indices {
            builder = builder.event(event_type.as_str(), index);
        }
    }

    let doc = builder
        .build()
        .map_err(|e| CodecError::corrupted(format!("invalid document: {}", e)))?;

    debug!(
        "Decoded {} streams x {} samples from {} bytes",
        doc.streams().len(),
        sample_count,
        bytes.len()
    );

    Ok(doc)
}

/// Encode a document and write it to `path`
pub fn write_document<P: AsRef<Path>>(
    path: P,
    doc: &DocumentContents,
    config: &CodecConfig,
) -> Result<(), CodecError> {
    let bytes = encode_with(doc, config)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Read and decode the document stored at `path`
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<DocumentContents, CodecError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Whether `bytes` start with the document signature
pub fn is_encoded_document(bytes: &[u8]) -> bool {
    bytes.starts_with(MAGIC)
}

fn read_stream_record(record: &[u8]) -> Result<(StreamId, Electrode), CodecError> {
    let mut id = [0u8; 16];
    id.copy_from_slice(&record[..16]);
    let prefix = Prefix::from_code(record[16])
        .ok_or_else(|| CodecError::corrupted(format!("unknown prefix code {}", record[16])))?;
    let suffix = Suffix::from_code(record[17]);
    Ok((StreamId::from_bytes(id), Electrode::new(prefix, suffix)))
}

fn inflate(compressed: &[u8], expected_len: u64) -> Result<Vec<u8>, CodecError> {
    let mut raw = Vec::new();
    ZlibDecoder::new(compressed)
        .take(expected_len.saturating_add(1))
        .read_to_end(&mut raw)
        .map_err(|e| CodecError::corrupted(format!("payload does not inflate: {}", e)))?;
    if raw.len() as u64 != expected_len {
        return Err(CodecError::corrupted(format!(
            "payload inflates to {} bytes, header declares {}",
            raw.len(),
            expected_len
        )));
    }
    Ok(raw)
}

fn length_u32(len: usize, what: &str) -> Result<u32, CodecError> {
    u32::try_from(len)
        .ok()
        .filter(|len| *len != u32::MAX)
        .ok_or_else(|| CodecError::InvalidConfig(format!("{} too large to encode", what)))
}

/// `u64::MAX` marks an absent epoch length and cannot be stored as a value
fn epoch_u64(len: usize) -> Result<u64, CodecError> {
    u64::try_from(len)
        .ok()
        .filter(|len| *len != u64::MAX)
        .ok_or_else(|| {
            CodecError::InvalidConfig(format!("epoch length {} too large to encode", len))
        })
}
