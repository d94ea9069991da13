//! Merged-mining proof (AuxPow) wire format
//!
//! Field order:
//! 1. Parent-chain coinbase transaction
//! 2. Parent block hash (32 bytes)
//! 3. Coinbase merkle branch (VarInt count + 32-byte hashes)
//! 4. Coinbase merkle index (4 bytes)
//! 5. Chain merkle branch (VarInt count + 32-byte hashes)
//! 6. Chain merkle index (4 bytes)
//! 7. Parent block header (80 bytes, never itself merge-mined)
//!
//! This module only carries the proof. Checking the branches against the
//! parent header and the coinbase commitment belongs to block validation.

use crate::error::Result;
use crate::serialization::{
    deserialize_block_header, deserialize_transaction, write_block_header, write_hash_vec,
    write_transaction, ByteReader,
};
use crate::types::*;
use log::trace;

pub fn serialize_auxpow(auxpow: &AuxPow) -> Vec<u8> {
    let mut result = Vec::new();
    write_auxpow(auxpow, &mut result);
    result
}

/// Append an AuxPow to `out`
pub fn write_auxpow(auxpow: &AuxPow, out: &mut Vec<u8>) {
    write_transaction(&auxpow.coinbase_tx, out);
    out.extend_from_slice(&auxpow.parent_block_hash);
    write_hash_vec(&auxpow.merkle_branch, out);
    out.extend_from_slice(&auxpow.merkle_index.to_le_bytes());
    write_hash_vec(&auxpow.chain_merkle_branch, out);
    out.extend_from_slice(&auxpow.chain_index.to_le_bytes());
    write_block_header(&auxpow.parent_block, out);
}

/// Decode an AuxPow. On error the caller gets nothing back; the reader may
/// have advanced past the fields that did parse.
pub fn deserialize_auxpow(reader: &mut ByteReader<'_>) -> Result<AuxPow> {
    let start = reader.position();

    let coinbase_tx = deserialize_transaction(reader)?;
    let parent_block_hash = reader.read_hash("auxpow parent block hash")?;
    let merkle_branch = reader.read_hash_vec("auxpow merkle branch")?;
    let merkle_index = reader.read_u32_le("auxpow merkle index")?;
    let chain_merkle_branch = reader.read_hash_vec("auxpow chain merkle branch")?;
    let chain_index = reader.read_u32_le("auxpow chain index")?;
    let parent_block = deserialize_block_header(reader)?;

    trace!(
        "decoded auxpow: {} bytes, branch depth {}/{}",
        reader.position() - start,
        merkle_branch.len(),
        chain_merkle_branch.len()
    );

    Ok(AuxPow {
        coinbase_tx,
        parent_block_hash,
        merkle_branch,
        merkle_index,
        chain_merkle_branch,
        chain_index,
        parent_block,
    })
}
