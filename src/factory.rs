//! Concrete object shapes per network
//!
//! Surrounding code asks the factory held in [`crate::network::Consensus`]
//! for headers and blocks instead of naming the types directly.

use crate::block::{deserialize_block_exact, deserialize_nyc_header_exact};
use crate::constants::COIN;
use crate::error::Result;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Version written into freshly created headers
pub const DEFAULT_BLOCK_VERSION: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsensusFactory {
    /// scrypt proof of work, AuxPow-capable headers
    NewYorkCoin,
}

/// Standard policy applied by transaction builders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPolicy {
    /// Minimum absolute fee, in base units
    pub min_fee: Integer,
}

impl ConsensusFactory {
    pub fn create_block_header(&self) -> NycBlockHeader {
        match self {
            ConsensusFactory::NewYorkCoin => NycBlockHeader::new(BlockHeader {
                version: DEFAULT_BLOCK_VERSION,
                prev_block_hash: [0; 32],
                merkle_root: [0; 32],
                timestamp: 0,
                bits: 0,
                nonce: 0,
            }),
        }
    }

    pub fn create_block(&self) -> Block {
        Block {
            header: self.create_block_header(),
            transactions: Vec::new(),
        }
    }

    pub fn deserialize_header(&self, bytes: &[u8]) -> Result<NycBlockHeader> {
        match self {
            ConsensusFactory::NewYorkCoin => deserialize_nyc_header_exact(bytes),
        }
    }

    pub fn deserialize_block(&self, bytes: &[u8]) -> Result<Block> {
        match self {
            ConsensusFactory::NewYorkCoin => deserialize_block_exact(bytes),
        }
    }

    pub fn transaction_policy(&self) -> TransactionPolicy {
        match self {
            ConsensusFactory::NewYorkCoin => TransactionPolicy { min_fee: COIN },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{serialize_block, serialize_nyc_header};

    #[test]
    fn test_created_header_has_no_auxpow() {
        let header = ConsensusFactory::NewYorkCoin.create_block_header();
        assert_eq!(header.version(), DEFAULT_BLOCK_VERSION);
        assert!(!header.is_auxpow());
        assert!(header.auxpow().is_none());
    }

    #[test]
    fn test_created_block_is_empty() {
        let block = ConsensusFactory::NewYorkCoin.create_block();
        assert!(block.transactions.is_empty());
    }

    #[test]
    fn test_factory_decodes_its_own_header() {
        let factory = ConsensusFactory::NewYorkCoin;
        let header = factory.create_block_header();
        let bytes = serialize_nyc_header(&header);
        assert_eq!(factory.deserialize_header(&bytes).unwrap(), header);
    }

    #[test]
    fn test_factory_rejects_trailing_bytes() {
        let factory = ConsensusFactory::NewYorkCoin;
        let mut bytes = serialize_nyc_header(&factory.create_block_header());
        bytes.push(0);
        assert!(factory.deserialize_header(&bytes).is_err());
    }

    #[test]
    fn test_created_block_survives_factory_decode() {
        let factory = ConsensusFactory::NewYorkCoin;
        let block = factory.create_block();
        let bytes = serialize_block(&block);
        assert_eq!(bytes.len(), 81);
        assert_eq!(factory.deserialize_block(&bytes).unwrap(), block);
    }

    #[test]
    fn test_factory_decodes_block() {
        let factory = ConsensusFactory::NewYorkCoin;
        let mut block = factory.create_block();
        block.transactions.push(Transaction {
            version: 1,
            inputs: vec![],
            outputs: vec![],
            lock_time: 0,
        });
        let bytes = serialize_block(&block);
        assert_eq!(factory.deserialize_block(&bytes).unwrap(), block);
    }

    #[test]
    fn test_min_fee_is_one_coin() {
        assert_eq!(
            ConsensusFactory::NewYorkCoin.transaction_policy().min_fee,
            100_000_000
        );
    }
}
