//! NewYorkCoin network parameters
//!
//! A closed set of profiles, each built once per process on first use and
//! shared as `&'static NetworkParams` afterwards. Callers select a profile
//! with [`Network`] and pass the resulting parameters down explicitly.

use crate::block::{block_hash, deserialize_block_exact, hash_from_hex};
use crate::constants::{COOKIE_FOLDER, CRYPTO_CODE};
use crate::error::{ConsensusError, Result};
use crate::factory::ConsensusFactory;
use crate::types::*;
use log::info;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// 00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff, wire order
const POW_LIMIT: Hash = {
    let mut limit = [0xff; 32];
    limit[29] = 0x0f;
    limit[30] = 0x00;
    limit[31] = 0x00;
    limit
};

const MAINNET_GENESIS_HASH: &str =
    "5597f25c062a3038c7fd815fe46c67dedfcb3c839fbc8e01ed4044540d08fe48";

const TESTNET_GENESIS_BLOCK: &str = "010000000000000000000000000000000000000000000000000000000000000000000000696ad20e2dd4365c7459b4a4a5af743d5e92c6da3229e6532cd605f6533f2a5bb9a7f052f0ff0f1ef7390f000101000000010000000000000000000000000000000000000000000000000000000000000000ffffffff1004ffff001d0104084e696e746f6e646fffffffff010058850c020000004341040184710fa689ad5023690c80f3a49c8f13f8d45b8c857fbcbc8bc4a8e4d3eb4b10f4d4604fa08dce601aaf0f470216fe1b51850b4acf21b179c45070ac7b03a9ac00000000";

static MAINNET: Lazy<NetworkParams> = Lazy::new(build_mainnet);
static TESTNET: Lazy<NetworkParams> = Lazy::new(build_testnet);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Testnet];

    /// Parameters for this profile, constructed on first call
    pub fn params(self) -> &'static NetworkParams {
        match self {
            Network::Mainnet => &MAINNET,
            Network::Testnet => &TESTNET,
        }
    }

    /// Resolve a profile by canonical name or alias, ignoring case
    pub fn from_name(name: &str) -> Option<Network> {
        Network::ALL.into_iter().find(|network| {
            let params = network.params();
            params.name.eq_ignore_ascii_case(name)
                || params.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
        })
    }
}

impl FromStr for Network {
    type Err = ConsensusError;

    fn from_str(s: &str) -> Result<Self> {
        Network::from_name(s).ok_or_else(|| ConsensusError::UnknownNetwork(s.to_string()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.params().name)
    }
}

/// Consensus rules a validator must be configured with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Consensus {
    pub subsidy_halving_interval: u32,
    pub majority_enforce_block_upgrade: u32,
    pub majority_reject_block_outdated: u32,
    pub majority_window: u32,
    /// Easiest allowed target, wire byte order
    pub pow_limit: Hash,
    pub pow_target_timespan: Duration,
    pub pow_target_spacing: Duration,
    pub pow_allow_min_difficulty_blocks: bool,
    pub coinbase_maturity: u32,
    pub pow_no_retargeting: bool,
    pub litecoin_work_calculation: bool,
    pub support_segwit: bool,
    pub consensus_factory: ConsensusFactory,
}

impl Consensus {
    /// Blocks between retargets
    pub fn difficulty_adjustment_interval(&self) -> u64 {
        self.pow_target_timespan.as_secs() / self.pow_target_spacing.as_secs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bech32Type {
    WitnessPubkeyAddress,
    WitnessScriptAddress,
}

/// Version bytes prepended before base58check encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    pub pubkey_address: [u8; 1],
    pub script_address: [u8; 1],
    pub secret_key: [u8; 1],
    pub ext_public_key: [u8; 4],
    pub ext_secret_key: [u8; 4],
}

/// Human-readable parts. Declared even though segwit is off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bech32Hrps {
    pub witness_pubkey_address: &'static str,
    pub witness_script_address: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: &'static str,
    pub host: &'static str,
}

/// How a profile pins its genesis block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Genesis {
    /// Display-order hash only
    Hash(&'static str),
    /// Fully serialized block, hex
    Serialized(&'static str),
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkParams {
    pub network: Network,
    pub name: &'static str,
    pub aliases: Vec<&'static str>,
    pub crypto_code: &'static str,
    pub magic: u32,
    pub port: u16,
    pub rpc_port: u16,
    pub dns_seeds: Vec<DnsSeed>,
    pub static_seeds: Vec<SocketAddr>,
    pub genesis: Genesis,
    pub base58: Base58Prefixes,
    pub bech32: Bech32Hrps,
    pub consensus: Consensus,
    /// Data-directory folder holding the RPC cookie, set after construction
    pub cookie_folder: Option<&'static str>,
}

/// Profiles are identified by name
impl PartialEq for NetworkParams {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for NetworkParams {}

impl NetworkParams {
    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.base58.pubkey_address,
            Base58Type::ScriptAddress => &self.base58.script_address,
            Base58Type::SecretKey => &self.base58.secret_key,
            Base58Type::ExtPublicKey => &self.base58.ext_public_key,
            Base58Type::ExtSecretKey => &self.base58.ext_secret_key,
        }
    }

    pub fn bech32_hrp(&self, kind: Bech32Type) -> &'static str {
        match kind {
            Bech32Type::WitnessPubkeyAddress => self.bech32.witness_pubkey_address,
            Bech32Type::WitnessScriptAddress => self.bech32.witness_script_address,
        }
    }

    /// Genesis block hash in wire order
    pub fn genesis_hash(&self) -> Result<Hash> {
        match self.genesis {
            Genesis::Hash(hash) => hash_from_hex(hash)
                .map_err(|e| ConsensusError::InvalidGenesis(format!("{}: {e}", self.name))),
            Genesis::Serialized(_) => {
                let block = self.genesis_block()?.ok_or_else(|| {
                    ConsensusError::InvalidGenesis(format!("{}: no genesis block", self.name))
                })?;
                Ok(block_hash(&block.header))
            }
        }
    }

    /// The full genesis block, when the profile ships one
    pub fn genesis_block(&self) -> Result<Option<Block>> {
        match self.genesis {
            Genesis::Hash(_) => Ok(None),
            Genesis::Serialized(raw) => {
                let bytes = hex::decode(raw)
                    .map_err(|e| ConsensusError::InvalidGenesis(format!("{}: {e}", self.name)))?;
                deserialize_block_exact(&bytes)
                    .map(Some)
                    .map_err(|e| ConsensusError::InvalidGenesis(format!("{}: {e}", self.name)))
            }
        }
    }

    /// `<home>/.newyorkc[/testnet3]/.cookie`. Nothing is read from disk.
    pub fn cookie_path(&self, home: &Path) -> Option<PathBuf> {
        let folder = self.cookie_folder?;
        let mut path = home.join(format!(".{folder}"));
        if self.network == Network::Testnet {
            path.push("testnet3");
        }
        path.push(".cookie");
        Some(path)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConsensusError::Config(e.to_string()))
    }

    fn post_init(mut self) -> Self {
        self.cookie_folder = Some(COOKIE_FOLDER);
        self
    }
}

/// Production profile
pub fn build_mainnet() -> NetworkParams {
    let params = NetworkParams {
        network: Network::Mainnet,
        name: "nyc-main",
        aliases: vec!["nyc-mainnet", "newyorkcoin-mainnet", "newyorkcoin-main"],
        crypto_code: CRYPTO_CODE,
        magic: 0x1e0ffff0,
        port: 17020,
        rpc_port: 18823,
        dns_seeds: vec![
            DnsSeed {
                name: "nycoin.money",
                host: "dnsseed.nycoin.money",
            },
            DnsSeed {
                name: "nycoin.community",
                host: "dnsseed.nycoin.community",
            },
        ],
        static_seeds: Vec::new(),
        genesis: Genesis::Hash(MAINNET_GENESIS_HASH),
        base58: Base58Prefixes {
            pubkey_address: [60],
            script_address: [22],
            secret_key: [188],
            ext_public_key: [0x04, 0x88, 0xb2, 0x1e],
            ext_secret_key: [0x04, 0x88, 0xad, 0xe4],
        },
        bech32: Bech32Hrps {
            witness_pubkey_address: "nyc",
            witness_script_address: "nyc",
        },
        consensus: Consensus {
            subsidy_halving_interval: 500_000,
            majority_enforce_block_upgrade: 1500,
            majority_reject_block_outdated: 1900,
            majority_window: 2000,
            pow_limit: POW_LIMIT,
            pow_target_timespan: Duration::from_secs(2 * 60 * 60),
            pow_target_spacing: Duration::from_secs(30),
            pow_allow_min_difficulty_blocks: false,
            coinbase_maturity: 30,
            pow_no_retargeting: false,
            litecoin_work_calculation: true,
            support_segwit: false,
            consensus_factory: ConsensusFactory::NewYorkCoin,
        },
        cookie_folder: None,
    }
    .post_init();
    info!("built {} parameters (magic {:#010x})", params.name, params.magic);
    params
}

/// Test profile
pub fn build_testnet() -> NetworkParams {
    let params = NetworkParams {
        network: Network::Testnet,
        name: "nyc-test",
        aliases: vec!["nyc-testnet", "newyorkcoin-test", "newyorkcoin-testnet"],
        crypto_code: CRYPTO_CODE,
        magic: 0xdcb7c1fc,
        port: 27020,
        rpc_port: 22555,
        dns_seeds: vec![DnsSeed {
            name: "jrn.me.uk",
            host: "testseed.jrn.me.uk",
        }],
        static_seeds: Vec::new(),
        genesis: Genesis::Serialized(TESTNET_GENESIS_BLOCK),
        base58: Base58Prefixes {
            pubkey_address: [113],
            script_address: [196],
            secret_key: [241],
            ext_public_key: [0x04, 0x88, 0xb2, 0x1e],
            ext_secret_key: [0x04, 0x88, 0xad, 0xe4],
        },
        bech32: Bech32Hrps {
            witness_pubkey_address: "tnyc",
            witness_script_address: "tnyc",
        },
        consensus: Consensus {
            subsidy_halving_interval: 1722,
            majority_enforce_block_upgrade: 501,
            majority_reject_block_outdated: 750,
            majority_window: 1000,
            pow_limit: POW_LIMIT,
            pow_target_timespan: Duration::from_secs(60),
            pow_target_spacing: Duration::from_secs(60),
            pow_allow_min_difficulty_blocks: true,
            coinbase_maturity: 30,
            pow_no_retargeting: false,
            litecoin_work_calculation: true,
            support_segwit: false,
            consensus_factory: ConsensusFactory::NewYorkCoin,
        },
        cookie_folder: None,
    }
    .post_init();
    info!("built {} parameters (magic {:#010x})", params.name, params.magic);
    params
}
