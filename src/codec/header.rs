use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use super::input::Input;
use super::{CodecError, SampleEncoding};

/// File signature
pub const MAGIC: &[u8; 4] = b"EEGD";

/// Current format version
pub const FORMAT_VERSION: u16 = 1;

/// Size of the fixed header in bytes
pub const HEADER_LEN: usize = 84;

const ABSENT_U32: u32 = u32::MAX;
const ABSENT_U64: u64 = u64::MAX;

/// Fixed-size document header
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Header {
    pub sample_encoding: SampleEncoding,
    pub sample_count: u64,
    pub sample_rate: f64,
    pub stream_count: u32,
    pub subject_len: Option<u32>,
    pub info_len: Option<u32>,
    pub epoch_length: Option<u64>,
    pub event_type_count: u32,
    pub payload_len: u64,
    pub compressed_len: u64,
    pub payload_crc: u32,
    pub document_id: [u8; 16],
}

impl Header {
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(MAGIC)?;
        out.write_u16::<LittleEndian>(FORMAT_VERSION)?;
        out.write_u8(self.sample_encoding.tag())?;
        out.write_u8(self.sample_encoding.decimals())?;
        out.write_u64::<LittleEndian>(self.sample_count)?;
        out.write_f64::<LittleEndian>(self.sample_rate)?;
        out.write_u32::<LittleEndian>(self.stream_count)?;
        out.write_u32::<LittleEndian>(self.subject_len.unwrap_or(ABSENT_U32))?;
        out.write_u32::<LittleEndian>(self.info_len.unwrap_or(ABSENT_U32))?;
        out.write_u64::<LittleEndian>(self.epoch_length.unwrap_or(ABSENT_U64))?;
        out.write_u32::<LittleEndian>(self.event_type_count)?;
        out.write_u64::<LittleEndian>(self.payload_len)?;
        out.write_u64::<LittleEndian>(self.compressed_len)?;
        out.write_u32::<LittleEndian>(self.payload_crc)?;
        out.write_all(&self.document_id)?;
        Ok(())
    }

    pub fn read_from(input: &mut Input<'_>) -> Result<Self, CodecError> {
        input.enter("header");
        if input.remaining() < MAGIC.len() || input.take(MAGIC.len())? != MAGIC {
            return Err(CodecError::corrupted("missing EEGD signature"));
        }

        let version = input.u16()?;
        if version != FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }

        let tag = input.u8()?;
        let decimals = input.u8()?;
        let sample_encoding = SampleEncoding::from_tag(tag, decimals).ok_or_else(|| {
            CodecError::corrupted(format!(
                "unknown sample encoding {} with {} decimals",
                tag, decimals
            ))
        })?;

        let sample_count = input.u64()?;
        let sample_rate = input.f64()?;
        let stream_count = input.u32()?;
        let subject_len = optional_u32(input.u32()?);
        let info_len = optional_u32(input.u32()?);
        let epoch_length = optional_u64(input.u64()?);
        let event_type_count = input.u32()?;
        let payload_len = input.u64()?;
        let compressed_len = input.u64()?;
        let payload_crc = input.u32()?;
        let mut document_id = [0u8; 16];
        document_id.copy_from_slice(input.take(16)?);

        if stream_count == 0 && sample_count != 0 {
            return Err(CodecError::corrupted(format!(
                "{} samples declared without streams",
                sample_count
            )));
        }

        Ok(Self {
            sample_encoding,
            sample_count,
            sample_rate,
            stream_count,
            subject_len,
            info_len,
            epoch_length,
            event_type_count,
            payload_len,
            compressed_len,
            payload_crc,
            document_id,
        })
    }
}

fn optional_u32(value: u32) -> Option<u32> {
    (value != ABSENT_U32).then_some(value)
}

fn optional_u64(value: u64) -> Option<u64> {
    (value != ABSENT_U64).then_some(value)
}
