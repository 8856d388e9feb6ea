//! A growable byte buffer with a read cursor, used both to stage the
//! footer/index region pulled off disk and to build in-process test
//! fixtures.

use crate::codec::{self, Endian};
use crate::error::{BpError, ErrorKind, Result};

/// 8-byte alignment matches the on-disk record alignment used throughout
/// the index sections.
const ALIGNMENT: usize = 8;

/// Owns a byte region plus a read cursor into it. `data` may be larger
/// than the logically valid region; callers size reads against `len`.
#[derive(Debug, Clone)]
pub struct Buffer {
    data: Vec<u8>,
    offset: usize,
}

impl Buffer {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, offset: 0 }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Grows the backing storage so its length is a multiple of
    /// [`ALIGNMENT`], zero-filling the new tail.
    pub fn realloc_aligned(&mut self, min_len: usize) {
        let aligned = min_len.div_ceil(ALIGNMENT) * ALIGNMENT;
        if self.data.len() < aligned {
            self.data.resize(aligned, 0);
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(BpError::new(
                ErrorKind::OutOfBound,
                format!(
                    "seek to {offset} past buffer length {len}",
                    len = self.data.len()
                ),
            ));
        }
        self.offset = offset;
        Ok(())
    }

    pub fn advance(&mut self, count: usize) -> Result<()> {
        self.seek(self.offset + count)
    }

    fn take(&mut self, count: usize) -> Result<&[u8]> {
        let end = self.offset.checked_add(count).ok_or_else(|| {
            BpError::new(ErrorKind::OutOfBound, "read length overflowed usize")
        })?;
        if end > self.data.len() {
            return Err(BpError::new(
                ErrorKind::OutOfBound,
                format!(
                    "read of {count} bytes at offset {off} exceeds buffer length {len}",
                    off = self.offset,
                    len = self.data.len()
                ),
            ));
        }
        let slice = &self.data[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        Ok(self.take(count)?.to_vec())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self, order: Endian) -> Result<u16> {
        Ok(codec::read_u16(self.take(2)?, order))
    }

    pub fn read_u32(&mut self, order: Endian) -> Result<u32> {
        Ok(codec::read_u32(self.take(4)?, order))
    }

    pub fn read_u64(&mut self, order: Endian) -> Result<u64> {
        Ok(codec::read_u64(self.take(8)?, order))
    }

    pub fn read_i64(&mut self, order: Endian) -> Result<i64> {
        Ok(codec::read_i64(self.take(8)?, order))
    }

    pub fn read_f32(&mut self, order: Endian) -> Result<f32> {
        Ok(codec::read_f32(self.take(4)?, order))
    }

    pub fn read_f64(&mut self, order: Endian) -> Result<f64> {
        Ok(codec::read_f64(self.take(8)?, order))
    }

    /// Reads a `u16`-length-prefixed UTF-8 string, the encoding used for
    /// every name field in the index sections.
    pub fn read_string(&mut self, order: Endian) -> Result<String> {
        let len = self.read_u16(order)? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| BpError::new(ErrorKind::CorruptedFooter, format!("invalid utf-8 name: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_up_to_eight() {
        let mut buf = Buffer::empty();
        buf.realloc_aligned(13);
        assert_eq!(buf.len(), 16);
    }

    #[test]
    fn read_past_end_is_out_of_bound() {
        let mut buf = Buffer::new(vec![1, 2, 3]);
        let err = buf.read_u32(Endian::Little).unwrap_err();
        assert_eq!(err.kind, ErrorKind::OutOfBound);
    }

    #[test]
    fn round_trips_length_prefixed_string() {
        let mut raw = Vec::new();
        raw.extend_from_slice(&3u16.to_le_bytes());
        raw.extend_from_slice(b"abc");
        let mut buf = Buffer::new(raw);
        assert_eq!(buf.read_string(Endian::Little).unwrap(), "abc");
    }
}
