//! CompactSize variable-length integers
//!
//! - value < 0xfd: single byte
//! - value <= 0xffff: 0xfd prefix + 2 bytes (little-endian)
//! - value <= 0xffffffff: 0xfe prefix + 4 bytes (little-endian)
//! - otherwise: 0xff prefix + 8 bytes (little-endian)
//!
//! Decoding rejects non-canonical encodings, as the reference node does.

use crate::error::{ConsensusError, Result};

/// Encode a u64 value as a CompactSize
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut result = Vec::with_capacity(9);
    write_varint(value, &mut result);
    result
}

/// Append a CompactSize to `out`
pub fn write_varint(value: u64, out: &mut Vec<u8>) {
    if value < 0xfd {
        out.push(value as u8);
    } else if value <= 0xffff {
        out.push(0xfd);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xffffffff {
        out.push(0xfe);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Decode a CompactSize, returning the value and the number of bytes consumed
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize)> {
    let first_byte = *data.first().ok_or_else(insufficient_bytes)?;

    let (value, len, min) = match first_byte {
        b if b < 0xfd => return Ok((b as u64, 1)),
        0xfd => {
            let raw: [u8; 2] = take(data)?;
            (u16::from_le_bytes(raw) as u64, 3, 0xfd)
        }
        0xfe => {
            let raw: [u8; 4] = take(data)?;
            (u32::from_le_bytes(raw) as u64, 5, 0x10000)
        }
        _ => {
            let raw: [u8; 8] = take(data)?;
            (u64::from_le_bytes(raw), 9, 0x100000000)
        }
    };

    if value < min {
        return Err(ConsensusError::Serialization(
            "Non-canonical VarInt encoding".to_string(),
        ));
    }

    Ok((value, len))
}

fn take<const N: usize>(data: &[u8]) -> Result<[u8; N]> {
    data.get(1..1 + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(insufficient_bytes)
}

fn insufficient_bytes() -> ConsensusError {
    ConsensusError::Serialization("Insufficient bytes to decode VarInt".to_string())
}
