//! Block-explorer client CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI args ──▶ config (TOML + env + --base-url, validated)
//!                   │
//!                   ▼
//!            ┌──────────────┐
//!            │ http::Fetcher│  timeout / retry / backoff, attempt events
//!            └──────┬───────┘
//!        ┌──────────┼──────────────┐
//!        ▼          ▼              ▼
//!   ChainReader  BlockTxPager  PaymentAggregator
//!        └──────────┴──────────────┘
//!                   │
//!                   ▼
//!        result JSON on stdout, diagnostics on stderr
//! ```
//!
//! Exit status is non-zero on any configuration, fetch or validation failure;
//! nothing is written to stdout in that case.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing::Instrument;

use explorer_client::blockchain::{self, BlockTxPager, ChainReader, ExplorerError};
use explorer_client::config::{self, ClientConfig, ObservabilityConfig};
use explorer_client::observability::init_logging;
use explorer_client::payments::PaymentAggregator;

#[derive(Parser)]
#[command(name = "explorer-client")]
#[command(about = "Resilient client for a block-explorer indexing API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current tip height and hash
    Tip,
    /// Latest block with all of its transactions
    Latest,
    /// A block with all of its transactions
    Block {
        /// Block hash
        hash: String,
    },
    /// Incoming payments to an address
    Payments {
        /// Address to inspect
        address: String,
    },
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Explorer(#[from] ExplorerError),
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref(), cli.base_url.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            // Logging is not configured yet; fall back to defaults to report.
            if init_logging(&ObservabilityConfig::default()).is_err() {
                eprintln!("configuration error: {err}");
            }
            tracing::error!(error = %err, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.observability) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("run", %run_id);

    match run(cli.command, &config, cli.pretty).instrument(span).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%run_id, error = %err, "Command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &ClientConfig, pretty: bool) -> Result<String, AppError> {
    tracing::info!(
        base_url = %config.api.base_url,
        network = %config.api.network,
        max_attempts = config.retries.max_attempts,
        timeout_ms = config.retries.timeout_ms,
        "Configuration loaded"
    );

    let reader = ChainReader::from_config(config)?;

    match command {
        Commands::Tip => encode(&blockchain::fetch_tip(&reader).await?, pretty),
        Commands::Latest => {
            let pager = BlockTxPager::from_reader(&reader, &config.pagination);
            encode(&blockchain::fetch_latest_block(&reader, &pager).await?, pretty)
        }
        Commands::Block { hash } => {
            let pager = BlockTxPager::from_reader(&reader, &config.pagination);
            encode(&blockchain::fetch_block(&reader, &pager, &hash).await?, pretty)
        }
        Commands::Payments { address } => {
            let aggregator = PaymentAggregator::new(reader);
            encode(&aggregator.get_payments(&address).await?, pretty)
        }
    }
}

fn encode<T: Serialize>(value: &T, pretty: bool) -> Result<String, AppError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(encoded)
}
