//! NewYorkCoin header and block wire format, plus identity hashing
//!
//! A header is the 80 base bytes, followed by an [`AuxPow`] when bit 8 of
//! the version is set. The identity hash and the proof-of-work hash both
//! cover the base bytes only.

use crate::auxpow::{deserialize_auxpow, write_auxpow};
use crate::error::{ConsensusError, Result};
use crate::serialization::{
    deserialize_block_header, deserialize_transaction, serialize_block_header, write_block_header,
    write_transaction, write_varint, ByteReader,
};
use crate::types::*;
use bitcoin_hashes::{sha256d, Hash as BitcoinHash, HashEngine};
use log::debug;

/// Smallest possible serialized transaction: version + two empty counts + lock time
const MIN_TRANSACTION_SIZE: usize = 4 + 1 + 1 + 4;

pub fn serialize_nyc_header(header: &NycBlockHeader) -> Vec<u8> {
    let mut result = Vec::new();
    write_nyc_header(header, &mut result);
    result
}

/// Append the header to `out`.
///
/// The AuxPow is written whenever one is attached, so a decoded header
/// re-encodes to the same bytes. A freshly built header with the version
/// bit set but no proof attached encodes as the base 80 bytes only.
pub fn write_nyc_header(header: &NycBlockHeader, out: &mut Vec<u8>) {
    write_block_header(header.base(), out);
    if let Some(auxpow) = header.auxpow() {
        write_auxpow(auxpow, out);
    }
}

/// Decode a header, pulling in the AuxPow when the version announces one
pub fn deserialize_nyc_header(reader: &mut ByteReader<'_>) -> Result<NycBlockHeader> {
    let base = deserialize_block_header(reader)?;
    if !base.has_auxpow_flag() {
        return Ok(NycBlockHeader::new(base));
    }

    debug!(
        "header version {:#x} announces auxpow, {} bytes follow",
        base.version,
        reader.remaining()
    );
    let auxpow = deserialize_auxpow(reader).map_err(|e| {
        ConsensusError::Serialization(format!(
            "header version {:#x} announces auxpow: {e}",
            base.version
        ))
    })?;
    Ok(NycBlockHeader::with_auxpow(base, auxpow))
}

/// Decode a header that must occupy the whole buffer
pub fn deserialize_nyc_header_exact(bytes: &[u8]) -> Result<NycBlockHeader> {
    let mut reader = ByteReader::new(bytes);
    let header = deserialize_nyc_header(&mut reader)?;
    reader.finish()?;
    Ok(header)
}

pub fn serialize_block(block: &Block) -> Vec<u8> {
    let mut result = Vec::new();
    write_nyc_header(&block.header, &mut result);
    write_varint(block.transactions.len() as u64, &mut result);
    for tx in &block.transactions {
        write_transaction(tx, &mut result);
    }
    result
}

pub fn deserialize_block(reader: &mut ByteReader<'_>) -> Result<Block> {
    let header = deserialize_nyc_header(reader)?;

    let tx_count = reader.read_length(MIN_TRANSACTION_SIZE, "block transaction count")?;

    let mut transactions = Vec::with_capacity(tx_count);
    for _ in 0..tx_count {
        transactions.push(deserialize_transaction(reader)?);
    }

    Ok(Block {
        header,
        transactions,
    })
}

/// Decode a block that must occupy the whole buffer
pub fn deserialize_block_exact(bytes: &[u8]) -> Result<Block> {
    let mut reader = ByteReader::new(bytes);
    let block = deserialize_block(&mut reader)?;
    reader.finish()?;
    Ok(block)
}

/// Identity hash: SHA256d over the 80 base bytes, AuxPow excluded
pub fn block_hash(header: &NycBlockHeader) -> Hash {
    sha256d::Hash::hash(&serialize_block_header(header.base())).into_inner()
}

/// Transaction id: SHA256d over the legacy serialization
pub fn transaction_id(tx: &Transaction) -> Hash {
    let mut data = Vec::new();
    write_transaction(tx, &mut data);
    sha256d::Hash::hash(&data).into_inner()
}

/// Merkle root over transaction ids, duplicating the last hash on odd levels
pub fn compute_merkle_root(transactions: &[Transaction]) -> Result<Hash> {
    if transactions.is_empty() {
        return Err(ConsensusError::Serialization(
            "Cannot calculate merkle root for empty transaction list".to_string(),
        ));
    }

    let mut hashes: Vec<Hash> = transactions.iter().map(transaction_id).collect();

    while hashes.len() > 1 {
        hashes = hashes
            .chunks(2)
            .map(|pair| {
                let mut engine = sha256d::Hash::engine();
                engine.input(&pair[0]);
                engine.input(pair.last().unwrap_or(&pair[0]));
                sha256d::Hash::from_engine(engine).into_inner()
            })
            .collect();
    }

    Ok(hashes[0])
}

/// Render a hash the way explorers and RPC show it (byte-reversed hex)
pub fn hash_to_hex(hash: &Hash) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    hex::encode(reversed)
}

/// Parse a byte-reversed hex hash into wire order
pub fn hash_from_hex(s: &str) -> Result<Hash> {
    let bytes = hex::decode(s)
        .map_err(|e| ConsensusError::Serialization(format!("Invalid hash hex {s:?}: {e}")))?;
    let mut hash: Hash = bytes.try_into().map_err(|bytes: Vec<u8>| {
        ConsensusError::Serialization(format!("Hash must be 32 bytes, got {}", bytes.len()))
    })?;
    hash.reverse();
    Ok(hash)
}
