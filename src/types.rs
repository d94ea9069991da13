//! Core NewYorkCoin block and merged-mining types

use crate::constants::VERSION_AUXPOW;
use crate::error::ConsensusError;
use serde::{Deserialize, Serialize};

/// Hash type: 256-bit hash in wire byte order
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Integer type
pub type Integer = i64;

/// OutPoint: 𝒪 = ℍ × ℕ
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

/// Transaction Input: ℐ = 𝒪 × 𝕊 × ℕ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub script_sig: ByteString,
    pub sequence: u32,
}

/// Transaction Output: 𝒯 = ℤ × 𝕊
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: Integer,
    pub script_pubkey: ByteString,
}

/// Transaction: 𝒯𝒳 = ℕ × ℐ* × 𝒯* × ℕ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    /// A coinbase spends the null outpoint with a single input
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1
            && self.inputs[0].prevout.hash == [0u8; 32]
            && self.inputs[0].prevout.index == 0xffffffff
    }
}

/// Block Header: ℋ = ℤ × ℍ × ℍ × ℕ × ℕ × ℕ
///
/// The plain 80-byte header. Parent-chain headers embedded in an
/// [`AuxPow`] always use this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block_hash: Hash,
    pub merkle_root: Hash,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    pub fn has_auxpow_flag(&self) -> bool {
        self.version & VERSION_AUXPOW != 0
    }
}

/// Merged-mining proof carried after a NewYorkCoin header.
///
/// The parent chain's coinbase commits to our block hash; the two merkle
/// branches tie that coinbase to the parent header. Nothing here is
/// verified on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxPow {
    pub coinbase_tx: Transaction,
    pub parent_block_hash: Hash,
    pub merkle_branch: Vec<Hash>,
    pub merkle_index: u32,
    pub chain_merkle_branch: Vec<Hash>,
    pub chain_index: u32,
    pub parent_block: BlockHeader,
}

/// What follows the base header on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderPayload {
    Base,
    WithAuxPow(Box<AuxPow>),
}

/// NewYorkCoin block header: base header plus an optional merged-mining proof.
///
/// A header only carries an [`AuxPow`] while bit 8 of its version is set.
/// The reverse does not hold: a locally built header may set the bit
/// without attaching a proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HeaderParts", into = "HeaderParts")]
pub struct NycBlockHeader {
    header: BlockHeader,
    payload: HeaderPayload,
}

impl NycBlockHeader {
    pub fn new(header: BlockHeader) -> Self {
        Self {
            header,
            payload: HeaderPayload::Base,
        }
    }

    /// Attach a merged-mining proof, raising the version bit to match
    pub fn with_auxpow(mut header: BlockHeader, auxpow: AuxPow) -> Self {
        header.version |= VERSION_AUXPOW;
        Self {
            header,
            payload: HeaderPayload::WithAuxPow(Box::new(auxpow)),
        }
    }

    pub fn base(&self) -> &BlockHeader {
        &self.header
    }

    pub fn payload(&self) -> &HeaderPayload {
        &self.payload
    }

    pub fn version(&self) -> i32 {
        self.header.version
    }

    pub fn auxpow(&self) -> Option<&AuxPow> {
        match &self.payload {
            HeaderPayload::Base => None,
            HeaderPayload::WithAuxPow(auxpow) => Some(auxpow),
        }
    }

    pub fn is_auxpow(&self) -> bool {
        self.header.has_auxpow_flag()
    }

    /// Attach or swap the proof, returning the previous one
    pub fn replace_auxpow(&mut self, auxpow: AuxPow) -> Option<AuxPow> {
        self.header.version |= VERSION_AUXPOW;
        match std::mem::replace(&mut self.payload, HeaderPayload::WithAuxPow(Box::new(auxpow))) {
            HeaderPayload::Base => None,
            HeaderPayload::WithAuxPow(old) => Some(*old),
        }
    }

    /// Drop the proof and clear the version bit
    pub fn strip_auxpow(&mut self) -> Option<AuxPow> {
        self.header.version &= !VERSION_AUXPOW;
        match std::mem::replace(&mut self.payload, HeaderPayload::Base) {
            HeaderPayload::Base => None,
            HeaderPayload::WithAuxPow(old) => Some(*old),
        }
    }

    pub fn into_parts(self) -> (BlockHeader, Option<AuxPow>) {
        match self.payload {
            HeaderPayload::Base => (self.header, None),
            HeaderPayload::WithAuxPow(auxpow) => (self.header, Some(*auxpow)),
        }
    }
}

impl From<BlockHeader> for NycBlockHeader {
    fn from(header: BlockHeader) -> Self {
        Self::new(header)
    }
}

/// Flat form of [`NycBlockHeader`] used by serde
#[derive(Clone, Serialize, Deserialize)]
struct HeaderParts {
    header: BlockHeader,
    auxpow: Option<AuxPow>,
}

impl TryFrom<HeaderParts> for NycBlockHeader {
    type Error = ConsensusError;

    fn try_from(parts: HeaderParts) -> Result<Self, Self::Error> {
        match parts.auxpow {
            None => Ok(Self::new(parts.header)),
            Some(_) if !parts.header.has_auxpow_flag() => Err(ConsensusError::Serialization(
                "AuxPow present but version bit 256 is clear".to_string(),
            )),
            Some(auxpow) => Ok(Self::with_auxpow(parts.header, auxpow)),
        }
    }
}

impl From<NycBlockHeader> for HeaderParts {
    fn from(header: NycBlockHeader) -> Self {
        let (header, auxpow) = header.into_parts();
        Self { header, auxpow }
    }
}

/// Block: ℬ = ℋ × 𝒯𝒳*
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: NycBlockHeader,
    pub transactions: Vec<Transaction>,
}
