//! # NYC-Consensus
//!
//! NewYorkCoin block headers with merged mining (AuxPow), scrypt proof of
//! work, and the production/test network parameters.
//!
//! This crate provides pure, side-effect-free functions: decoding works on a
//! caller-supplied buffer, parameter sets are built once and never mutated.
//!
//! ## Wire format
//!
//! A header is the usual 80 bytes. When bit 8 (256) of its version is set,
//! an [`AuxPow`](types::AuxPow) follows: the parent chain's coinbase, two
//! merkle branches and the parent header. Block identity is SHA256d of the
//! 80 bytes; proof of work is scrypt(N=1024, r=1, p=1) of the same bytes.
//!
//! ## Usage
//!
//! ```rust
//! use nyc_consensus::{NewYorkCoin, Network};
//! use nyc_consensus::types::*;
//!
//! let nyc = NewYorkCoin::new(Network::Testnet);
//! let header = NycBlockHeader::new(BlockHeader {
//!     version: 1,
//!     prev_block_hash: [0; 32],
//!     merkle_root: [0; 32],
//!     timestamp: 1391503289,
//!     bits: 0x1e0ffff0,
//!     nonce: 0,
//! });
//!
//! let bytes = nyc.serialize_header(&header);
//! assert_eq!(bytes.len(), 80);
//! let decoded = nyc.deserialize_header(&bytes).unwrap();
//! assert!(decoded.auxpow().is_none());
//! ```

pub mod auxpow;
pub mod block;
pub mod config;
pub mod constants;
pub mod error;
pub mod factory;
pub mod network;
pub mod pow;
pub mod serialization;
pub mod types;

// Re-export commonly used types
pub use types::*;
pub use constants::*;
pub use config::ChainConfig;
pub use error::{ConsensusError, Result};
pub use factory::{ConsensusFactory, TransactionPolicy};
pub use network::{Network, NetworkParams};

/// Entry point bound to one network profile
///
/// # Examples
///
/// ```
/// use nyc_consensus::{NewYorkCoin, Network};
///
/// let nyc = NewYorkCoin::new(Network::Mainnet);
/// assert_eq!(nyc.params().magic, 0x1e0ffff0);
/// assert_eq!(nyc.params().port, 17020);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NewYorkCoin {
    params: &'static NetworkParams,
}

impl NewYorkCoin {
    pub fn new(network: Network) -> Self {
        Self {
            params: network.params(),
        }
    }

    /// Select the profile named in `config`
    ///
    /// # Examples
    ///
    /// ```
    /// use nyc_consensus::{ChainConfig, NewYorkCoin};
    ///
    /// let config = ChainConfig::from_json(r#"{"network": "nyc-testnet"}"#).unwrap();
    /// let nyc = NewYorkCoin::from_config(&config).unwrap();
    /// assert_eq!(nyc.params().name, "nyc-test");
    /// ```
    pub fn from_config(config: &ChainConfig) -> Result<Self> {
        Ok(Self {
            params: config.params()?,
        })
    }

    pub fn params(&self) -> &'static NetworkParams {
        self.params
    }

    pub fn factory(&self) -> ConsensusFactory {
        self.params.consensus.consensus_factory
    }

    /// Decode a header occupying the whole buffer
    pub fn deserialize_header(&self, bytes: &[u8]) -> Result<NycBlockHeader> {
        self.factory().deserialize_header(bytes)
    }

    pub fn serialize_header(&self, header: &NycBlockHeader) -> Vec<u8> {
        block::serialize_nyc_header(header)
    }

    /// Decode a block occupying the whole buffer
    pub fn deserialize_block(&self, bytes: &[u8]) -> Result<Block> {
        self.factory().deserialize_block(bytes)
    }

    pub fn serialize_block(&self, block: &Block) -> Vec<u8> {
        block::serialize_block(block)
    }

    /// SHA256d identity hash
    pub fn block_hash(&self, header: &NycBlockHeader) -> Hash {
        block::block_hash(header)
    }

    /// scrypt proof-of-work hash of the base header
    pub fn pow_hash(&self, header: &NycBlockHeader) -> Result<Hash> {
        pow::pow_hash(header.base())
    }

    /// Check the header's own scrypt hash against its bits
    ///
    /// # Examples
    ///
    /// ```
    /// use nyc_consensus::{NewYorkCoin, Network};
    ///
    /// let nyc = NewYorkCoin::new(Network::Testnet);
    /// let genesis = nyc.params().genesis_block().unwrap().unwrap();
    /// assert!(nyc.check_proof_of_work(&genesis.header).unwrap());
    /// ```
    pub fn check_proof_of_work(&self, header: &NycBlockHeader) -> Result<bool> {
        pow::check_proof_of_work(header.base(), &self.params.consensus)
    }

    pub fn genesis_hash(&self) -> Result<Hash> {
        self.params.genesis_hash()
    }
}

impl Default for NewYorkCoin {
    fn default() -> Self {
        Self::new(Network::Mainnet)
    }
}
