//! wallet-watch - low-balance wallet monitor.
//!
//! Loads wallet and chain definitions from a spreadsheet registry, checks
//! each wallet's balance against its stepped threshold, posts webhook alerts
//! for new low-balance steps, and writes fresh balances back.

mod config;
mod healthcheck;
mod run;

use clap::Parser;
use config::Config;
use run::{ChainBalanceSource, Monitor, SheetsWriter, WebhookSink};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use walletwatch_balances::BalanceClient;
use walletwatch_core::ChainRegistry;
use walletwatch_registry::SheetsClient;

/// Wallet balance monitor CLI.
#[derive(Parser, Debug)]
#[command(name = "wallet-watch")]
#[command(about = "Low-balance wallet monitor", long_about = None)]
struct Args {
    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Evaluate wallets without sending alerts or writing balances
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(e) = run_once(&args).await {
        error!("run failed: {e}");
        std::process::exit(1);
    }
}

async fn run_once(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let sheets = SheetsClient::new(&config.spreadsheet_id, &config.sheets_token)?;

    let chains = match &config.chains_range {
        Some(range) => sheets.load_chains(range).await?,
        None => ChainRegistry::builtin(),
    };
    info!(chains = chains.len(), "chain registry ready");

    // Registry load failure is fatal; there is nothing to process.
    let (wallets, sheet) = sheets.load_wallets(&config.wallets_range).await?;
    info!(wallets = wallets.len(), "wallet registry loaded");

    let monitor = Monitor::new(
        ChainBalanceSource::new(BalanceClient::new(config.api_keys.clone())?, chains.clone()),
        SheetsWriter::new(sheets, sheet),
        WebhookSink::new()?,
        chains,
        args.dry_run,
    );

    let summary = monitor.run(&wallets).await;
    info!(
        checked = summary.checked,
        healthy = summary.healthy,
        alerted = summary.alerted,
        suppressed = summary.suppressed,
        failed = summary.failed,
        "run complete"
    );

    if args.dry_run {
        return Ok(());
    }
    if let Some(url) = &config.healthcheck_url {
        healthcheck::ping(url).await;
    }
    Ok(())
}
