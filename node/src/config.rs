//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};

use bido_permit::Domain;
use bido_types::Address;

use crate::logging::{self, LogFormat};
use crate::NodeError;

/// Configuration for a Bido ledger instance.
///
/// Can be loaded from a TOML file via [`BidoConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidoConfig {
    /// Account that holds the bootstrap share floor.
    #[serde(default = "default_initial_holder")]
    pub initial_holder: Address,

    /// Permit domain: human-readable ledger name.
    #[serde(default = "default_domain_name")]
    pub domain_name: String,

    /// Permit domain: signing-format version.
    #[serde(default = "default_domain_version")]
    pub domain_version: String,

    /// Permit domain: chain the ledger runs on.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Permit domain: address of this ledger instance.
    #[serde(default)]
    pub verifying_contract: Address,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_initial_holder() -> Address {
    Address::DEAD
}

fn default_domain_name() -> String {
    "Bido Staked BTC".to_string()
}

fn default_domain_version() -> String {
    "1".to_string()
}

fn default_chain_id() -> u64 {
    1501
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl BidoConfig {
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Install the global subscriber using `log_format` and `log_level`.
    pub fn init_logging(&self) -> Result<(), NodeError> {
        logging::init_logging(self.log_format, &self.log_level)
    }

    /// The permit domain described by this config.
    pub fn domain(&self) -> Domain {
        Domain {
            name: self.domain_name.clone(),
            version: self.domain_version.clone(),
            chain_id: self.chain_id,
            verifying_contract: self.verifying_contract,
        }
    }
}

impl Default for BidoConfig {
    fn default() -> Self {
        Self {
            initial_holder: default_initial_holder(),
            domain_name: default_domain_name(),
            domain_version: default_domain_version(),
            chain_id: default_chain_id(),
            verifying_contract: Address::ZERO,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
