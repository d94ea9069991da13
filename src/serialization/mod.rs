//! Wire format serialization/deserialization
//!
//! All integers are little-endian. Decoding works on a [`ByteReader`] over a
//! caller-supplied buffer and fails on the first truncated field.

pub mod header;
pub mod reader;
pub mod transaction;
pub mod varint;

pub use header::{deserialize_block_header, serialize_block_header, write_block_header};
pub use reader::ByteReader;
pub use transaction::{deserialize_transaction, serialize_transaction, write_transaction};
pub use varint::{decode_varint, encode_varint, write_varint};

use crate::types::Hash;

/// Append a length-prefixed vector of hashes to `out`
pub fn write_hash_vec(hashes: &[Hash], out: &mut Vec<u8>) {
    write_varint(hashes.len() as u64, out);
    for hash in hashes {
        out.extend_from_slice(hash);
    }
}
