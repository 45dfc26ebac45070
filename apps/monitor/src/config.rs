//! Environment configuration, loaded once at process start.

use std::collections::HashMap;
use thiserror::Error;

/// Prefix for per-network balance API credentials, e.g. `API_KEY_MAINNET`.
const API_KEY_PREFIX: &str = "API_KEY_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Spreadsheet holding the wallet (and optionally chain) registry.
    pub spreadsheet_id: String,
    /// Bearer token for the spreadsheet API.
    pub sheets_token: String,
    /// Range of the wallets sheet; the first row is the header.
    pub wallets_range: String,
    /// Range of the chains sheet. When unset, the built-in chain table is
    /// used.
    pub chains_range: Option<String>,
    /// Liveness ping fired once after a completed run.
    pub healthcheck_url: Option<String>,
    /// Per-network balance API credentials, keyed by lowercased network.
    pub api_keys: HashMap<String, String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            spreadsheet_id: require("SPREADSHEET_ID")?,
            sheets_token: require("SHEETS_ACCESS_TOKEN")?,
            wallets_range: optional("WALLETS_RANGE").unwrap_or_else(|| "Wallets".to_string()),
            chains_range: optional("CHAINS_RANGE"),
            healthcheck_url: optional("HEALTHCHECK_URL"),
            api_keys: api_keys_from(std::env::vars()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Collect `API_KEY_<NETWORK>` variables into a network-keyed map.
fn api_keys_from(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter_map(|(name, value)| {
        let network = name.strip_prefix(API_KEY_PREFIX)?;
        if network.is_empty() || value.trim().is_empty() {
            return None;
        }
        Some((network.to_lowercase(), value))
    })
    .collect()
}
