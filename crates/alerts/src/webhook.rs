//! Slack-style webhook payloads and delivery.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use walletwatch_core::{ChainRecord, WalletRecord};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook delivery failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One labeled field in an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

/// One attachment block with a danger/ok color marker.
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    pub text: String,
    pub fields: Vec<Field>,
    pub color: String,
}

/// Webhook message body.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub attachments: Vec<Attachment>,
}

impl WebhookPayload {
    /// Low-balance alert: explorer-linked wallet name, balance with the
    /// chain's currency symbol, and the network, marked "danger".
    pub fn low_balance(wallet: &WalletRecord, chain: &ChainRecord, balance: f64) -> Self {
        let fields = vec![
            Field {
                title: "Wallet".to_string(),
                value: format!("<{}|{}>", chain.address_url(&wallet.address), wallet.name),
                short: true,
            },
            Field {
                title: "Balance".to_string(),
                value: format!("{balance:.3} {}", chain.currency),
                short: true,
            },
            Field {
                title: "Network".to_string(),
                value: wallet.network.to_string(),
                short: true,
            },
        ];
        Self {
            attachments: vec![Attachment {
                text: format!(":alert: Low balance on wallet {}", wallet.name),
                fields,
                color: "danger".to_string(),
            }],
        }
    }
}

/// Posts alert payloads to per-wallet webhook URLs. Deliveries are not
/// retried; the caller decides whether a failure blocks anything.
pub struct WebhookNotifier {
    http: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new() -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { http })
    }

    /// POST the payload to the given webhook URL.
    pub async fn send(&self, webhook_url: &str, payload: &WebhookPayload) -> Result<(), NotifyError> {
        debug!(url = webhook_url, "posting alert webhook");
        self.http
            .post(webhook_url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn wallet() -> WalletRecord {
        WalletRecord::from_raw(
            2,
            "relayer",
            "0xabc",
            "mainnet",
            "20",
            "5",
            "19",
            "https://hooks.example.com/T000/B000",
        )
        .unwrap()
    }

    fn chain() -> ChainRecord {
        ChainRecord::new("mainnet", "https://api.etherscan.io", "https://etherscan.io", "ETH")
    }

    #[test]
    fn test_low_balance_payload_shape() {
        let payload = WebhookPayload::low_balance(&wallet(), &chain(), 18.5);
        let json = serde_json::to_value(&payload).unwrap();

        let attachment = &json["attachments"][0];
        assert_eq!(attachment["text"], ":alert: Low balance on wallet relayer");
        assert_eq!(attachment["color"], "danger");

        let fields = attachment["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0]["title"], "Wallet");
        assert_eq!(fields[0]["value"], "<https://etherscan.io/address/0xabc|relayer>");
        assert_eq!(fields[0]["short"], true);
        assert_eq!(fields[1]["value"], "18.500 ETH");
        assert_eq!(fields[2]["value"], "mainnet");
    }

    #[test]
    fn test_balance_formatted_to_three_decimals() {
        let payload = WebhookPayload::low_balance(&wallet(), &chain(), 0.1);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["attachments"][0]["fields"][1]["value"], "0.100 ETH");
    }
}
