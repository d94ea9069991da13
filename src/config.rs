//! Network selection config
//!
//! ```json
//! { "network": "nyc-testnet", "home_dir": "/home/alice" }
//! ```

use crate::error::{ConsensusError, Result};
use crate::network::{Network, NetworkParams};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    /// Canonical profile name or any alias
    pub network: String,
    /// Base for the RPC cookie path
    pub home_dir: Option<PathBuf>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet.params().name.to_string(),
            home_dir: None,
        }
    }
}

impl ChainConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConsensusError::Config(e.to_string()))
    }

    pub fn network(&self) -> Result<Network> {
        self.network.parse()
    }

    pub fn params(&self) -> Result<&'static NetworkParams> {
        Ok(self.network()?.params())
    }

    pub fn cookie_path(&self) -> Result<Option<PathBuf>> {
        let params = self.params()?;
        Ok(self
            .home_dir
            .as_deref()
            .and_then(|home| params.cookie_path(home)))
    }
}
