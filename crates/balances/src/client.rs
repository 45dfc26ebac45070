//! Balance fetcher for etherscan-compatible account APIs.

use crate::error::BalanceError;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use walletwatch_core::{from_base_units, ChainRecord, ChainRegistry};

/// Response envelope shared by etherscan and blockscout style APIs.
/// `result` holds the base-unit balance on success and the error message
/// when `status` is "0".
#[derive(Debug, Deserialize)]
struct BalanceResponse {
    status: String,
    result: String,
}

/// Balance query client with per-network API credentials.
pub struct BalanceClient {
    http: reqwest::Client,
    api_keys: HashMap<String, String>,
}

impl BalanceClient {
    /// Create a client. `api_keys` maps network identifiers to the
    /// credential the chain's API expects; networks without an entry are
    /// queried without one.
    pub fn new(api_keys: HashMap<String, String>) -> Result<Self, BalanceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        let api_keys = api_keys
            .into_iter()
            .map(|(network, key)| (network.to_lowercase(), key))
            .collect();
        Ok(Self { http, api_keys })
    }

    /// Credential for a network, looked up case-insensitively.
    pub fn api_key(&self, network: &str) -> Option<&str> {
        self.api_keys.get(&network.to_lowercase()).map(String::as_str)
    }

    /// Fetch a wallet's balance in the chain's display unit, rounded to 3
    /// decimal places.
    pub async fn fetch_balance(
        &self,
        network: &str,
        address: &str,
        chains: &ChainRegistry,
    ) -> Result<f64, BalanceError> {
        let chain = chains
            .get(network)
            .ok_or_else(|| BalanceError::UnknownNetwork(network.to_string()))?;

        let mut query: Vec<(&str, &str)> = vec![
            ("module", "account"),
            ("action", "balance"),
            ("address", address),
        ];
        if let Some(key) = self.api_key(network) {
            query.push(("apikey", key));
        }

        let url = query_url(chain);
        debug!(network, address, "querying balance");
        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        let payload: BalanceResponse = response
            .json()
            .await
            .map_err(|e| BalanceError::Malformed(e.to_string()))?;

        if payload.status == "0" {
            return Err(BalanceError::Api(payload.result));
        }

        from_base_units(&payload.result, chain.decimals)
            .ok_or_else(|| BalanceError::Malformed(payload.result))
    }
}

/// Endpoint for a chain's account API. Blockscout deployments already carry
/// the `/api` suffix in their registry entry.
fn query_url(chain: &ChainRecord) -> String {
    let base = chain.api_url.trim_end_matches('/');
    if base.ends_with("/api") {
        base.to_string()
    } else {
        format!("{base}/api")
    }
}
