//! Bounds-checked cursor over a caller-supplied byte buffer

use super::varint::decode_varint;
use crate::error::{ConsensusError, Result};
use crate::types::Hash;

/// Forward-only reader. Every read either consumes exactly the bytes it
/// needs or fails without moving the cursor.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(ConsensusError::Serialization(format!(
                "Truncated {what}: need {len} bytes at offset {}, {} remaining",
                self.offset,
                self.remaining()
            )));
        }
        let data: &'a [u8] = self.data;
        let slice = &data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, what)?);
        Ok(out)
    }

    pub fn read_u32_le(&mut self, what: &str) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array(what)?))
    }

    pub fn read_i32_le(&mut self, what: &str) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array(what)?))
    }

    pub fn read_i64_le(&mut self, what: &str) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array(what)?))
    }

    pub fn read_hash(&mut self, what: &str) -> Result<Hash> {
        self.read_array(what)
    }

    pub fn read_varint(&mut self, what: &str) -> Result<u64> {
        let (value, len) = decode_varint(&self.data[self.offset..]).map_err(|e| {
            ConsensusError::Serialization(format!("{what} at offset {}: {e}", self.offset))
        })?;
        self.offset += len;
        Ok(value)
    }

    /// Read a sequence length and check that `len * min_item_size` bytes can
    /// still follow. Nothing is allocated for a length the buffer cannot hold.
    pub fn read_length(&mut self, min_item_size: usize, what: &str) -> Result<usize> {
        let start = self.offset;
        let declared = self.read_varint(what)?;
        let fits = usize::try_from(declared)
            .ok()
            .and_then(|n| n.checked_mul(min_item_size.max(1)))
            .map_or(false, |bytes| bytes <= self.remaining());
        if !fits {
            self.offset = start;
            return Err(ConsensusError::Serialization(format!(
                "Declared {what} of {declared} exceeds the {} bytes remaining",
                self.remaining()
            )));
        }
        Ok(declared as usize)
    }

    /// Length-prefixed byte string
    pub fn read_byte_string(&mut self, what: &str) -> Result<Vec<u8>> {
        let len = self.read_length(1, what)?;
        Ok(self.read_bytes(len, what)?.to_vec())
    }

    /// Length-prefixed vector of 32-byte hashes
    pub fn read_hash_vec(&mut self, what: &str) -> Result<Vec<Hash>> {
        let count = self.read_length(32, what)?;
        let mut hashes = Vec::with_capacity(count);
        for _ in 0..count {
            hashes.push(self.read_hash(what)?);
        }
        Ok(hashes)
    }

    /// Fail if any bytes are left unread
    pub fn finish(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ConsensusError::Serialization(format!(
                "{} trailing bytes after offset {}",
                self.remaining(),
                self.offset
            )))
        }
    }
}
