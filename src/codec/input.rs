use byteorder::{LittleEndian, ReadBytesExt};

use super::CodecError;

/// Bounds-checked reader over an in-memory document.
///
/// Every read checks the remaining length first, so corrupt length fields fail
/// with [`CodecError::CorruptedData`] instead of allocating.
pub(super) struct Input<'a> {
    bytes: &'a [u8],
    section: &'static str,
}

impl<'a> Input<'a> {
    pub(super) fn new(bytes: &'a [u8], section: &'static str) -> Self {
        Self { bytes, section }
    }

    pub(super) fn enter(&mut self, section: &'static str) {
        self.section = section;
    }

    pub(super) fn remaining(&self) -> usize {
        self.bytes.len()
    }

    /// Everything not read yet
    pub(super) fn rest(&mut self) -> &'a [u8] {
        std::mem::take(&mut self.bytes)
    }

    pub(super) fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if len > self.bytes.len() {
            return Err(self.truncated());
        }
        let (head, tail) = self.bytes.split_at(len);
        self.bytes = tail;
        Ok(head)
    }

    /// `count` fixed-size records, checked against the remaining length before use
    pub(super) fn take_records(
        &mut self,
        count: usize,
        record_len: usize,
    ) -> Result<&'a [u8], CodecError> {
        let len = count
            .checked_mul(record_len)
            .ok_or_else(|| self.truncated())?;
        self.take(len)
    }

    pub(super) fn text(&mut self, len: usize) -> Result<String, CodecError> {
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| {
            CodecError::corrupted(format!("invalid UTF-8 text in {}", self.section))
        })
    }

    pub(super) fn u8(&mut self) -> Result<u8, CodecError> {
        self.bytes.read_u8().map_err(|_| self.truncated())
    }

    pub(super) fn u16(&mut self) -> Result<u16, CodecError> {
        self.bytes
            .read_u16::<LittleEndian>()
            .map_err(|_| self.truncated())
    }

    pub(super) fn u32(&mut self) -> Result<u32, CodecError> {
        self.bytes
            .read_u32::<LittleEndian>()
            .map_err(|_| self.truncated())
    }

    pub(super) fn u64(&mut self) -> Result<u64, CodecError> {
        self.bytes
            .read_u64::<LittleEndian>()
            .map_err(|_| self.truncated())
    }

    pub(super) fn f64(&mut self) -> Result<f64, CodecError> {
        self.bytes
            .read_f64::<LittleEndian>()
            .map_err(|_| self.truncated())
    }

    pub(super) fn usize(&mut self) -> Result<usize, CodecError> {
        let value = self.u64()?;
        usize::try_from(value).map_err(|_| {
            CodecError::corrupted(format!("{} value {} does not fit in memory", self.section, value))
        })
    }

    pub(super) fn truncated(&self) -> CodecError {
        CodecError::corrupted(format!("unexpected end of data in {}", self.section))
    }
}
