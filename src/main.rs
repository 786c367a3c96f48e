//! jnc-sync: keeps a local folder in step with a J-Novel Club ebook library.
//!
//! Each run logs in, fetches the account's owned books, downloads every
//! released volume that the local ledger doesn't list yet, records each
//! success in the ledger, and logs out again.

#![warn(clippy::all)]

mod auth;
mod cli;
mod client;
mod config;
mod download;
mod library;
mod service;
mod shutdown;
mod state;
mod sync;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use auth::Credentials;
use cli::Command;
use client::JncClient;
use config::{expand_tilde, Config};
use download::{DownloadConfig, DownloadExecutor};
use state::DownloadLedger;
use sync::{SyncConfig, SyncOrchestrator};

/// Run the status command.
async fn run_status(args: cli::StatusArgs) -> anyhow::Result<()> {
    let ledger_path = expand_tilde(&args.ledger.path);
    if !ledger_path.exists() {
        println!("No ledger found at {}", ledger_path.display());
        println!("Run a sync first to create it.");
        return Ok(());
    }

    let ledger = DownloadLedger::open(&ledger_path).await?;
    println!("Ledger: {}", ledger.path().display());
    if ledger.is_empty() {
        println!("  No books recorded yet.");
        return Ok(());
    }
    println!("  Downloaded books: {}", ledger.len());

    if args.list {
        println!();
        for id in ledger.ids() {
            println!("  {}", id);
        }
    }

    Ok(())
}

/// Run the sync command.
async fn run_sync(args: cli::SyncArgs) -> anyhow::Result<()> {
    let config = Config::from_args(args)?;
    tracing::debug!(?config, "Resolved configuration");

    let password = match config.password.clone() {
        Some(pw) => pw,
        None => tokio::task::block_in_place(|| rpassword::prompt_password("J-Novel Club password: "))?,
    };
    let credentials = Credentials::new(config.email.clone(), password);

    let mut ledger = DownloadLedger::open(&config.ledger_path).await?;
    tracing::info!(
        "{} books recorded in {}",
        ledger.len(),
        ledger.path().display()
    );

    let http = client::build_http_client(config.timeout_secs)?;
    let service = JncClient::new(http, config.endpoints.clone());
    let executor = DownloadExecutor::new(DownloadConfig::new(config.directory.clone()));
    let shutdown = shutdown::install_signal_handler()?;

    let sync_config = SyncConfig {
        credentials,
        update_existing_books: config.update_books,
        dry_run: config.dry_run,
        no_progress_bar: config.no_progress_bar,
    };
    let mut orchestrator = SyncOrchestrator::new(&service, executor, sync_config, shutdown);

    let result = orchestrator.run(&mut ledger).await;
    tracing::debug!(phase = ?orchestrator.phase(), "Sync finished");
    let summary = result?;
    summary.log(config.dry_run);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_filter())),
        )
        .init();

    match cli.effective_command() {
        Command::Status(args) => run_status(args).await,
        Command::Sync(args) => run_sync(args).await,
    }
}
