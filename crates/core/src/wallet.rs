//! Wallet records as loaded from the registry.

use crate::numeric::{parse_decimal, parse_delta, parse_threshold};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One monitored wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletRecord {
    /// 1-based sheet row the record came from; used only for the balance
    /// write-back.
    pub row: u32,
    /// Display label.
    pub name: String,
    /// Chain address, opaque beyond display and query use.
    pub address: String,
    /// Network identifier, resolved case-insensitively against the chain
    /// registry.
    pub network: CompactString,
    /// Balance floor below which alerting is warranted.
    pub threshold: f64,
    /// Hysteresis step size, always positive.
    pub delta: f64,
    /// Last recorded balance, absent on first run.
    pub previous_balance: Option<f64>,
    /// Destination for alert messages.
    pub webhook_url: String,
}

impl WalletRecord {
    /// Build a record from raw string fields as they arrive from the
    /// registry. Returns None when the row has no name or address.
    pub fn from_raw(
        row: u32,
        name: &str,
        address: &str,
        network: &str,
        threshold: &str,
        delta: &str,
        balance: &str,
        webhook_url: &str,
    ) -> Option<Self> {
        let name = name.trim();
        let address = address.trim();
        if name.is_empty() || address.is_empty() {
            return None;
        }
        Some(Self {
            row,
            name: name.to_string(),
            address: address.to_string(),
            network: CompactString::new(network.trim()),
            threshold: parse_threshold(threshold),
            delta: parse_delta(delta),
            previous_balance: parse_decimal(balance),
            webhook_url: webhook_url.trim().to_string(),
        })
    }
}
