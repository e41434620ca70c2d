//! Uncompressed payload: the event table followed by every stream's samples.
//!
//! Samples are stored as 8-byte words in byte-stream-split order: byte 0 of every
//! word, then byte 1 of every word, and so on. Neighbouring samples of a signal
//! share their high bytes, so this layout gives zlib long runs to work with.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use super::input::Input;
use super::{length_u32, CodecError, SampleEncoding};
use crate::document::{DocumentContents, EventMarkers};

/// 2^63, the first magnitude `i64` cannot hold
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Decoded payload, before it is checked against the document invariants
#[derive(Debug)]
pub(super) struct Payload {
    pub events: Vec<(String, Vec<usize>)>,
    pub samples: Vec<Vec<f64>>,
}

pub(super) fn encode(
    doc: &DocumentContents,
    encoding: SampleEncoding,
) -> Result<Vec<u8>, CodecError> {
    let value_count = doc.streams().len() * doc.sample_count().unwrap_or(0);
    let mut out = Vec::with_capacity(value_count * 8 + 64);

    write_events(doc.events(), &mut out)?;

    let mut words = Vec::with_capacity(doc.sample_count().unwrap_or(0));
    for stream in doc.streams() {
        words.clear();
        match encoding {
            SampleEncoding::Exact => words.extend(stream.samples().iter().map(|v| v.to_bits())),
            SampleEncoding::Quantized { decimals } => {
                quantize_into(stream.samples(), decimals, &mut words)?
            }
        }
        write_split(&words, &mut out);
    }

    Ok(out)
}

pub(super) fn decode(
    raw: &[u8],
    encoding: SampleEncoding,
    event_type_count: u32,
    stream_count: usize,
    sample_count: usize,
) -> Result<Payload, CodecError> {
    let mut input = Input::new(raw, "event table");
    let events = read_events(&mut input, event_type_count)?;

    input.enter("samples");
    let expected = stream_count
        .checked_mul(sample_count)
        .and_then(|n| n.checked_mul(8))
        .ok_or_else(|| CodecError::corrupted("sample count overflows"))?;
    if input.remaining() != expected {
        return Err(CodecError::corrupted(format!(
            "sample section holds {} bytes, expected {}",
            input.remaining(),
            expected
        )));
    }

    let mut samples = Vec::with_capacity(stream_count);
    for _ in 0..stream_count {
        let words = read_split(input.take_records(sample_count, 8)?, sample_count);
        samples.push(match encoding {
            SampleEncoding::Exact => words.into_iter().map(f64::from_bits).collect(),
            SampleEncoding::Quantized { decimals } => dequantize(&words, decimals),
        });
    }

    Ok(Payload { events, samples })
}

fn write_events(events: &EventMarkers, out: &mut Vec<u8>) -> Result<(), CodecError> {
    for event_type in events.types() {
        out.write_u32::<LittleEndian>(length_u32(event_type.len(), "event type name")?)?;
        out.write_all(event_type.as_bytes())?;
        let count = events.indices(event_type).count();
        out.write_u32::<LittleEndian>(length_u32(count, "event count")?)?;
        let mut previous = 0;
        for index in events.indices(event_type) {
            out.write_u64::<LittleEndian>((index - previous) as u64)?;
            previous = index;
        }
    }
    Ok(())
}

fn read_events(
    input: &mut Input<'_>,
    type_count: u32,
) -> Result<Vec<(String, Vec<usize>)>, CodecError> {
    let mut events: Vec<(String, Vec<usize>)> = Vec::new();
    for _ in 0..type_count {
        let name_len = input.u32()? as usize;
        let name = input.text(name_len)?;
        if events.last().is_some_and(|(last, _)| *last >= name) {
            return Err(CodecError::corrupted(format!(
                "event type {:?} out of order",
                name
            )));
        }

        let count = input.u32()? as usize;
        if count == 0 {
            return Err(CodecError::corrupted(format!(
                "event type {:?} has no markers",
                name
            )));
        }
        let mut deltas = Input::new(input.take_records(count, 8)?, "event table");
        let mut indices = Vec::with_capacity(count);
        let mut previous = 0usize;
        for position in 0..count {
            let delta = deltas.usize()?;
            if position > 0 && delta == 0 {
                return Err(CodecError::corrupted(format!(
                    "duplicate marker in event type {:?}",
                    name
                )));
            }
            previous = previous
                .checked_add(delta)
                .ok_or_else(|| CodecError::corrupted("event index overflows"))?;
            indices.push(previous);
        }
        events.push((name, indices));
    }
    Ok(events)
}

fn quantize_into(samples: &[f64], decimals: u8, words: &mut Vec<u64>) -> Result<(), CodecError> {
    let scale = 10f64.powi(i32::from(decimals));
    let mut previous = 0i64;
    for &value in samples {
        let scaled = (value * scale).round();
        if !scaled.is_finite() || scaled.abs() >= I64_LIMIT {
            return Err(CodecError::InvalidConfig(format!(
                "sample {} cannot be stored with {} decimals",
                value, decimals
            )));
        }
        let current = scaled as i64;
        words.push(zigzag(current.wrapping_sub(previous)));
        previous = current;
    }
    Ok(())
}

fn dequantize(words: &[u64], decimals: u8) -> Vec<f64> {
    let scale = 10f64.powi(i32::from(decimals));
    let mut previous = 0i64;
    words
        .iter()
        .map(|&word| {
            previous = previous.wrapping_add(unzigzag(word));
            previous as f64 / scale
        })
        .collect()
}

#[inline]
fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

fn write_split(words: &[u64], out: &mut Vec<u8>) {
    let start = out.len();
    let n = words.len();
    out.resize(start + n * 8, 0);
    for (i, word) in words.iter().enumerate() {
        for (k, byte) in word.to_le_bytes().into_iter().enumerate() {
            out[start + k * n + i] = byte;
        }
    }
}

fn read_split(bytes: &[u8], n: usize) -> Vec<u64> {
    (0..n)
        .map(|i| {
            let mut word = [0u8; 8];
            for (k, byte) in word.iter_mut().enumerate() {
                *byte = bytes[k * n + i];
            }
            u64::from_le_bytes(word)
        })
        .collect()
}
