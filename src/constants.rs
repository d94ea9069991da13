//! NewYorkCoin wire and proof-of-work constants

/// Version bit announcing a merged-mining proof after the base header
pub const VERSION_AUXPOW: i32 = 1 << 8;

/// Serialized size of the base block header
pub const BLOCK_HEADER_SIZE: usize = 80;

/// scrypt cost: N = 2^10 = 1024
pub const SCRYPT_LOG_N: u8 = 10;

/// scrypt block size factor
pub const SCRYPT_R: u32 = 1;

/// scrypt parallelization factor
pub const SCRYPT_P: u32 = 1;

/// scrypt output length in bytes
pub const SCRYPT_OUTPUT_LEN: usize = 32;

/// Base units per coin
pub const COIN: i64 = 100_000_000;

/// Ticker symbol
pub const CRYPTO_CODE: &str = "NYC";

/// Folder name used to locate the RPC authentication cookie
pub const COOKIE_FOLDER: &str = "newyorkc";

/// Sequence number for final transaction
pub const SEQUENCE_FINAL: u32 = 0xffffffff;
