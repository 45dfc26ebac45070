//! Chain records and the network registry.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Base-unit scale for EVM-style chains (wei per native unit).
pub const EVM_DECIMALS: u8 = 18;

/// One supported network: balance API endpoint, explorer, display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRecord {
    /// Network identifier, unique within the registry.
    pub network: CompactString,
    /// Base endpoint for balance queries.
    pub api_url: String,
    /// Base URL for constructing human-readable address links.
    pub explorer_url: String,
    /// Display symbol for the chain's native unit.
    pub currency: CompactString,
    /// Base-unit decimal places.
    pub decimals: u8,
}

impl ChainRecord {
    /// Create a chain record with the EVM-style base-unit scale.
    pub fn new(network: &str, api_url: &str, explorer_url: &str, currency: &str) -> Self {
        Self {
            network: CompactString::new(network),
            api_url: api_url.to_string(),
            explorer_url: explorer_url.to_string(),
            currency: CompactString::new(currency),
            decimals: EVM_DECIMALS,
        }
    }

    /// Explorer page for an address on this chain.
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_url.trim_end_matches('/'), address)
    }
}

/// Network identifier to chain record mapping with case-insensitive lookup.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: HashMap<String, ChainRecord>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static table matching the original deployment, used when no chains
    /// range is configured.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(ChainRecord::new(
            "mainnet",
            "https://api.etherscan.io",
            "https://etherscan.io",
            "ETH",
        ));
        registry.insert(ChainRecord::new(
            "rinkeby",
            "https://api-rinkeby.etherscan.io",
            "https://rinkeby.etherscan.io",
            "ETH-rinkeby",
        ));
        registry.insert(ChainRecord::new(
            "xdai",
            "https://blockscout.com/xdai/mainnet/api",
            "https://blockscout.com/xdai/mainnet",
            "xDAI",
        ));
        registry
    }

    /// Insert a record, keyed by its lowercased network identifier.
    pub fn insert(&mut self, record: ChainRecord) {
        self.chains.insert(record.network.to_lowercase().to_string(), record);
    }

    /// Look up a chain by network identifier, case-insensitively.
    pub fn get(&self, network: &str) -> Option<&ChainRecord> {
        self.chains.get(&network.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
