//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use cos_rpc::pagination::DEFAULT_PAGE_SIZE;
use cos_types::params::DEFAULT_EXPIRATION_SECS;
use cos_types::ChainId;
use cos_utils::LogFormat;

use crate::error::WalletError;

/// Configuration for a wallet talking to one node.
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of the node.
    #[serde(default = "default_node_url")]
    pub node_url: String,

    /// Chain the signatures are bound to.
    #[serde(default)]
    pub chain_id: ChainId,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Seconds added to the head block time to form a transaction's expiration.
    #[serde(default = "default_expiration_secs")]
    pub expiration_secs: u32,

    /// Page size for paginated queries.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Encrypted key store file.
    #[serde(default = "default_keystore_path")]
    pub keystore_path: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_node_url() -> String {
    "http://127.0.0.1:8888".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_expiration_secs() -> u32 {
    DEFAULT_EXPIRATION_SECS
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_keystore_path() -> PathBuf {
    PathBuf::from("cos-keystore.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, WalletError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| WalletError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            node_url: default_node_url(),
            chain_id: ChainId::default(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            expiration_secs: default_expiration_secs(),
            page_size: default_page_size(),
            keystore_path: default_keystore_path(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}
