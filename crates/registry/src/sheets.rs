//! Google Sheets values API client.

use crate::error::RegistryError;
use crate::rows::{a1_column, keyed_rows, normalize_key, SheetRow};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use walletwatch_core::{parse_decimal, ChainRecord, ChainRegistry, WalletRecord, EVM_DECIMALS};

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Write-back locator for the wallets sheet: which tab holds the rows and
/// which column is the recorded balance.
#[derive(Debug, Clone)]
pub struct WalletSheet {
    sheet: String,
    balance_column: Option<String>,
}

/// Client for one spreadsheet, authenticated with a bearer token.
pub struct SheetsClient {
    http: reqwest::Client,
    spreadsheet_id: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl SheetsClient {
    pub fn new(spreadsheet_id: &str, token: &str) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            spreadsheet_id: spreadsheet_id.to_string(),
            token: token.to_string(),
        })
    }

    /// Load wallet rows from the given range. The first row of the range
    /// must be the header row. Rows without a name or address are skipped.
    pub async fn load_wallets(
        &self,
        range: &str,
    ) -> Result<(Vec<WalletRecord>, WalletSheet), RegistryError> {
        let values = self.get_values(range).await?;
        let (sheet, first_row) = parse_range(range);

        let balance_column = values
            .first()
            .and_then(|header| find_column(header, "balance"));
        if balance_column.is_none() {
            warn!("wallets sheet has no balance column; write-back disabled");
        }

        let rows = keyed_rows(&values, first_row);
        let wallets = wallets_from_rows(&rows);
        debug!(
            rows = rows.len(),
            wallets = wallets.len(),
            "loaded wallet registry"
        );

        Ok((
            wallets,
            WalletSheet {
                sheet,
                balance_column,
            },
        ))
    }

    /// Load the chain registry from the given range.
    pub async fn load_chains(&self, range: &str) -> Result<ChainRegistry, RegistryError> {
        let values = self.get_values(range).await?;
        let (_, first_row) = parse_range(range);
        let rows = keyed_rows(&values, first_row);
        let chains = chains_from_rows(&rows);
        debug!(chains = chains.len(), "loaded chain registry");
        Ok(chains)
    }

    /// Write the balance cell for one wallet row, leaving every other column
    /// untouched.
    pub async fn update_balance(
        &self,
        sheet: &WalletSheet,
        row: u32,
        balance: f64,
    ) -> Result<(), RegistryError> {
        let column = sheet
            .balance_column
            .as_deref()
            .ok_or_else(|| RegistryError::MissingColumn("balance".to_string()))?;
        let cell = format!("{}!{column}{row}", sheet.sheet);
        self.put_value(&cell, &format!("{balance:.3}")).await
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, RegistryError> {
        let url = format!("{BASE_URL}/{}/values/{range}", self.spreadsheet_id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status.as_u16(), response.text().await.ok()));
        }

        let payload: ValueRange = response
            .json()
            .await
            .map_err(|e| RegistryError::Malformed(e.to_string()))?;
        Ok(payload.values)
    }

    async fn put_value(&self, cell: &str, value: &str) -> Result<(), RegistryError> {
        let url = format!(
            "{BASE_URL}/{}/values/{cell}?valueInputOption=RAW",
            self.spreadsheet_id
        );
        let body = serde_json::json!({ "values": [[value]] });
        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status.as_u16(), response.text().await.ok()));
        }
        Ok(())
    }
}

fn api_error(status: u16, body: Option<String>) -> RegistryError {
    let message = body
        .as_deref()
        .and_then(|text| serde_json::from_str::<ApiErrorEnvelope>(text).ok())
        .map(|envelope| envelope.error.message)
        .or(body)
        .unwrap_or_default();
    RegistryError::Api { status, message }
}

/// Split an A1 range into its sheet name and the absolute row its first
/// cell sits on. A bare sheet name starts at row 1.
fn parse_range(range: &str) -> (String, u32) {
    let (sheet, cells) = match range.split_once('!') {
        Some((sheet, cells)) => (sheet, Some(cells)),
        None => (range, None),
    };
    let sheet = sheet.trim_matches('\'').to_string();
    let first_row = cells
        .map(|cells| {
            let digits: String = cells
                .chars()
                .skip_while(|c| c.is_ascii_alphabetic())
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().unwrap_or(1)
        })
        .unwrap_or(1);
    (sheet, first_row)
}

/// A1 column letter of the named header, if present.
fn find_column(header: &[String], name: &str) -> Option<String> {
    header
        .iter()
        .position(|h| normalize_key(h) == name)
        .map(a1_column)
}

fn wallets_from_rows(rows: &[SheetRow]) -> Vec<WalletRecord> {
    rows.iter()
        .filter_map(|row| {
            // Older sheets carry the webhook under "slackHook".
            let webhook = row
                .get("webhookurl")
                .or_else(|| row.get("slackhook"))
                .unwrap_or("");
            let wallet = WalletRecord::from_raw(
                row.row,
                row.get_or_empty("name"),
                row.get_or_empty("address"),
                row.get_or_empty("network"),
                row.get_or_empty("threshold"),
                row.get_or_empty("delta"),
                row.get_or_empty("balance"),
                webhook,
            );
            if wallet.is_none() {
                warn!(row = row.row, "skipping wallet row without name/address");
            }
            wallet
        })
        .collect()
}

fn chains_from_rows(rows: &[SheetRow]) -> ChainRegistry {
    let mut registry = ChainRegistry::new();
    for row in rows {
        let network = row.get("network").or_else(|| row.get("name"));
        let api_url = row.get("apiurl");
        let (Some(network), Some(api_url)) = (network, api_url) else {
            warn!(row = row.row, "skipping chain row without network/apiUrl");
            continue;
        };
        let mut record = ChainRecord::new(
            network,
            api_url,
            row.get_or_empty("explorerurl"),
            row.get_or_empty("currency"),
        );
        record.decimals = row
            .get("decimals")
            .and_then(parse_decimal)
            .map(|d| d as u8)
            .unwrap_or(EVM_DECIMALS);
        registry.insert(record);
    }
    registry
}
