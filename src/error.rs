//! Error types for header decoding and network parameters

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid proof of work: {0}")]
    InvalidProofOfWork(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Invalid genesis block: {0}")]
    InvalidGenesis(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConsensusError>;
