//! Per-wallet monitoring flow.
//!
//! Each wallet runs fetch, decide, notify, persist to completion before
//! the next begins. Collaborators sit behind traits so the flow's rules
//! (no write-back on suppression or fetch failure, failures never halt the
//! run) are pinned by tests with in-memory fakes.

use async_trait::async_trait;
use tracing::{error, info, warn};
use walletwatch_alerts::{NotifyError, WebhookNotifier, WebhookPayload};
use walletwatch_balances::{BalanceClient, BalanceError};
use walletwatch_core::{alert_level, AlertLevel, ChainRecord, ChainRegistry, WalletRecord};
use walletwatch_registry::{RegistryError, SheetsClient, WalletSheet};

/// Source of current wallet balances.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn fetch_balance(&self, network: &str, address: &str) -> Result<f64, BalanceError>;
}

/// Write-back of recorded balances to the registry.
#[async_trait]
pub trait BalanceWriter: Send + Sync {
    async fn update_balance(&self, row: u32, balance: f64) -> Result<(), RegistryError>;
}

/// Alert delivery.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send_low_balance(
        &self,
        wallet: &WalletRecord,
        chain: &ChainRecord,
        balance: f64,
    ) -> Result<(), NotifyError>;
}

/// What happened to one wallet during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletOutcome {
    /// Balance healthy; recorded balance refreshed.
    Healthy,
    /// Low balance alert raised; recorded balance refreshed.
    Alerted,
    /// Low but still within the already-alerted step; nothing written.
    Suppressed,
    /// Unknown network or failed fetch; nothing written.
    Failed,
}

/// Per-run tally, logged once at the end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub checked: usize,
    pub healthy: usize,
    pub alerted: usize,
    pub suppressed: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: WalletOutcome) {
        self.checked += 1;
        match outcome {
            WalletOutcome::Healthy => self.healthy += 1,
            WalletOutcome::Alerted => self.alerted += 1,
            WalletOutcome::Suppressed => self.suppressed += 1,
            WalletOutcome::Failed => self.failed += 1,
        }
    }
}

/// Sequential wallet monitor.
pub struct Monitor<B, W, A> {
    balances: B,
    writer: W,
    alerts: A,
    chains: ChainRegistry,
    dry_run: bool,
}

impl<B: BalanceSource, W: BalanceWriter, A: AlertSink> Monitor<B, W, A> {
    pub fn new(balances: B, writer: W, alerts: A, chains: ChainRegistry, dry_run: bool) -> Self {
        Self {
            balances,
            writer,
            alerts,
            chains,
            dry_run,
        }
    }

    /// Process every wallet in registry order. Per-wallet failures are
    /// logged and never stop the run.
    pub async fn run(&self, wallets: &[WalletRecord]) -> RunSummary {
        let mut summary = RunSummary::default();
        for wallet in wallets {
            summary.record(self.process_wallet(wallet).await);
        }
        summary
    }

    async fn process_wallet(&self, wallet: &WalletRecord) -> WalletOutcome {
        let Some(chain) = self.chains.get(&wallet.network) else {
            warn!(
                wallet = %wallet.name,
                network = %wallet.network,
                "unknown network, skipping wallet"
            );
            return WalletOutcome::Failed;
        };

        let balance = match self
            .balances
            .fetch_balance(&wallet.network, &wallet.address)
            .await
        {
            Ok(balance) => balance,
            Err(e) => {
                warn!(
                    wallet = %wallet.name,
                    address = %wallet.address,
                    "balance fetch failed: {e}"
                );
                return WalletOutcome::Failed;
            }
        };

        let level = alert_level(balance, wallet.previous_balance, wallet.threshold, wallet.delta);
        let outcome = match level {
            AlertLevel::Skip => {
                warn!(
                    "low balance on wallet {} ({}): {balance:.3}. Skipping alert and balance update.",
                    wallet.name, wallet.address
                );
                return WalletOutcome::Suppressed;
            }
            AlertLevel::Error => {
                warn!(
                    "low balance on wallet {} ({}): {balance:.3}",
                    wallet.name, wallet.address
                );
                if !self.dry_run {
                    if let Err(e) = self.alerts.send_low_balance(wallet, chain, balance).await {
                        // Delivery failure never blocks the write-back.
                        error!(wallet = %wallet.name, "alert delivery failed: {e}");
                    }
                }
                WalletOutcome::Alerted
            }
            AlertLevel::Ok => {
                info!(
                    "balance on wallet {} ({}): {balance:.3}",
                    wallet.name, wallet.address
                );
                WalletOutcome::Healthy
            }
        };

        if self.dry_run {
            info!(wallet = %wallet.name, balance, "dry run, balance update withheld");
            return outcome;
        }

        info!("updating {} to {balance:.3}", wallet.name);
        if let Err(e) = self.writer.update_balance(wallet.row, balance).await {
            error!(wallet = %wallet.name, row = wallet.row, "balance update failed: {e}");
        }
        outcome
    }
}

/// Balance source over the chain APIs.
pub struct ChainBalanceSource {
    client: BalanceClient,
    chains: ChainRegistry,
}

impl ChainBalanceSource {
    pub fn new(client: BalanceClient, chains: ChainRegistry) -> Self {
        Self { client, chains }
    }
}

#[async_trait]
impl BalanceSource for ChainBalanceSource {
    async fn fetch_balance(&self, network: &str, address: &str) -> Result<f64, BalanceError> {
        self.client.fetch_balance(network, address, &self.chains).await
    }
}

/// Balance writer over the wallets sheet.
pub struct SheetsWriter {
    client: SheetsClient,
    sheet: WalletSheet,
}

impl SheetsWriter {
    pub fn new(client: SheetsClient, sheet: WalletSheet) -> Self {
        Self { client, sheet }
    }
}

#[async_trait]
impl BalanceWriter for SheetsWriter {
    async fn update_balance(&self, row: u32, balance: f64) -> Result<(), RegistryError> {
        self.client.update_balance(&self.sheet, row, balance).await
    }
}

/// Alert sink over the webhook notifier.
pub struct WebhookSink {
    notifier: WebhookNotifier,
}

impl WebhookSink {
    pub fn new() -> Result<Self, NotifyError> {
        Ok(Self {
            notifier: WebhookNotifier::new()?,
        })
    }
}

#[async_trait]
impl AlertSink for WebhookSink {
    async fn send_low_balance(
        &self,
        wallet: &WalletRecord,
        chain: &ChainRecord,
        balance: f64,
    ) -> Result<(), NotifyError> {
        let payload = WebhookPayload::low_balance(wallet, chain, balance);
        self.notifier.send(&wallet.webhook_url, &payload).await
    }
}
