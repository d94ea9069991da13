//! Base block header wire format
//!
//! Exactly 80 bytes:
//! - Version (4 bytes, little-endian, signed)
//! - Previous block hash (32 bytes)
//! - Merkle root (32 bytes)
//! - Timestamp (4 bytes, little-endian)
//! - Bits (4 bytes, little-endian)
//! - Nonce (4 bytes, little-endian)

use super::reader::ByteReader;
use crate::constants::BLOCK_HEADER_SIZE;
use crate::error::{ConsensusError, Result};
use crate::types::*;

pub fn serialize_block_header(header: &BlockHeader) -> Vec<u8> {
    let mut result = Vec::with_capacity(BLOCK_HEADER_SIZE);
    write_block_header(header, &mut result);
    result
}

/// Append the 80 base bytes of `header` to `out`
pub fn write_block_header(header: &BlockHeader, out: &mut Vec<u8>) {
    out.extend_from_slice(&header.version.to_le_bytes());
    out.extend_from_slice(&header.prev_block_hash);
    out.extend_from_slice(&header.merkle_root);
    out.extend_from_slice(&header.timestamp.to_le_bytes());
    out.extend_from_slice(&header.bits.to_le_bytes());
    out.extend_from_slice(&header.nonce.to_le_bytes());
}

pub fn deserialize_block_header(reader: &mut ByteReader<'_>) -> Result<BlockHeader> {
    // Fail before consuming anything if the fixed part is short
    if reader.remaining() < BLOCK_HEADER_SIZE {
        return Err(ConsensusError::Serialization(format!(
            "Truncated block header: need {BLOCK_HEADER_SIZE} bytes, {} remaining",
            reader.remaining()
        )));
    }

    let version = reader.read_i32_le("header version")?;
    let prev_block_hash = reader.read_hash("header previous block hash")?;
    let merkle_root = reader.read_hash("header merkle root")?;
    let timestamp = reader.read_u32_le("header timestamp")?;
    let bits = reader.read_u32_le("header bits")?;
    let nonce = reader.read_u32_le("header nonce")?;

    Ok(BlockHeader {
        version,
        prev_block_hash,
        merkle_root,
        timestamp,
        bits,
        nonce,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_header_layout() {
        let header = BlockHeader {
            version: 1,
            prev_block_hash: [1; 32],
            merkle_root: [2; 32],
            timestamp: 1234567890,
            bits: 0x1e0ffff0,
            nonce: 0x12345678,
        };

        let bytes = serialize_block_header(&header);
        assert_eq!(bytes.len(), 80);
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[72..76], &[0xf0, 0xff, 0x0f, 0x1e]);
        assert_eq!(&bytes[76..80], &[0x78, 0x56, 0x34, 0x12]);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(deserialize_block_header(&mut reader).unwrap(), header);
    }

    #[test]
    fn test_negative_version_survives() {
        let header = BlockHeader {
            version: -1,
            prev_block_hash: [0; 32],
            merkle_root: [0; 32],
            timestamp: 0,
            bits: 0,
            nonce: 0,
        };
        let bytes = serialize_block_header(&header);
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(deserialize_block_header(&mut reader).unwrap().version, -1);
    }

    #[test]
    fn test_extreme_field_values_survive() {
        let header = BlockHeader {
            version: i32::MIN,
            prev_block_hash: [0xff; 32],
            merkle_root: [0xee; 32],
            timestamp: u32::MAX,
            bits: u32::MAX,
            nonce: u32::MAX,
        };
        let bytes = serialize_block_header(&header);
        assert_eq!(&bytes[0..4], &[0x00, 0x00, 0x00, 0x80]);
        assert_eq!(&bytes[68..80], &[0xff; 12]);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(deserialize_block_header(&mut reader).unwrap(), header);
    }

    #[test]
    fn test_short_header_consumes_nothing() {
        let bytes = [0u8; 79];
        let mut reader = ByteReader::new(&bytes);
        assert!(deserialize_block_header(&mut reader).is_err());
        assert_eq!(reader.position(), 0);
    }
}
