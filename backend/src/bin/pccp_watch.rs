//! PCCP Watch command-line entry point.
//!
//! Meant to be run periodically by cron or launchd:
//!
//! ```bash
//! # One cycle, then deliver the alert if the cycle produced one
//! pccp-watch --data-dir ~/.pccp-watch watch
//!
//! # Offline run against a saved catalog
//! pccp-watch --catalog-file pccp.txt check
//! ```
//!
//! # Environment Variables
//!
//! - `PCCP_WATCH_DIR`: Data directory holding the config, `state.json` and the pending alert
//! - `PCCP_WATCH_REPOSITORY`: `file` (default) or `memory`
//! - `RUST_LOG`: Log filter (default: info); logs go to stderr, the report to stdout

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pccp_watch::config::WatchConfig;
use pccp_watch::db::{PendingAlertStore, RepositoryFactory, RepositoryType, StateRepository};
use pccp_watch::notify::{deliver_pending, notifiers_from_config, Delivery};
use pccp_watch::parsing::parse_catalog_str;
use pccp_watch::services::{run_cycle, CycleOutcome};
use pccp_watch::source::{CatalogSource, FileCatalogSource};

#[derive(Debug, Parser)]
#[command(name = "pccp-watch")]
#[command(
    about = "Alert on new observable objects of the MPC Possible Comet Confirmation Page",
    version
)]
struct Cli {
    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for state.json and the pending alert
    #[arg(long, global = true, env = "PCCP_WATCH_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Read the catalog from a local file instead of downloading it
    #[arg(long, global = true)]
    catalog_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one cycle and write the pending alert, if any
    Check,
    /// Deliver the pending alert and remove it
    Notify,
    /// Run one cycle, then deliver any pending alert
    Watch,
    /// Forget every known designation
    Reset,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let alerts = PendingAlertStore::in_dir(&cli.data_dir);

    match &cli.command {
        Command::Check => {
            let config = load_config(&cli)?;
            check(&cli, &config, &alerts)?;
        }
        Command::Notify => notify(&load_config(&cli)?, &alerts)?,
        Command::Watch => {
            let config = load_config(&cli)?;
            check(&cli, &config, &alerts)?;
            // Also retries an alert left over from a failed delivery.
            notify(&config, &alerts)?;
        }
        Command::Reset => {
            let repository = RepositoryFactory::create(RepositoryType::from_env(), &cli.data_dir);
            repository
                .reset()
                .with_context(|| format!("Failed to reset state at {}", repository.location()))?;
            println!("Known set cleared ({}).", repository.location());
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<WatchConfig> {
    match &cli.config {
        Some(path) => WatchConfig::from_file(path)
            .with_context(|| format!("Invalid configuration {}", path.display())),
        None => WatchConfig::from_default_location(&cli.data_dir)
            .context("Invalid or missing configuration"),
    }
}

fn catalog_source(cli: &Cli, config: &WatchConfig) -> Result<Box<dyn CatalogSource>> {
    if let Some(path) = &cli.catalog_file {
        return Ok(Box::new(FileCatalogSource::new(path)));
    }
    remote_source(&config.catalog_url)
}

#[cfg(feature = "remote")]
fn remote_source(url: &str) -> Result<Box<dyn CatalogSource>> {
    let source = pccp_watch::source::HttpCatalogSource::new(url)?;
    Ok(Box::new(source))
}

#[cfg(not(feature = "remote"))]
fn remote_source(url: &str) -> Result<Box<dyn CatalogSource>> {
    anyhow::bail!(
        "cannot download {}: built without the `remote` feature; use --catalog-file",
        url
    )
}

fn check(cli: &Cli, config: &WatchConfig, alerts: &PendingAlertStore) -> Result<CycleOutcome> {
    let source = catalog_source(cli, config)?;
    let text = source
        .fetch()
        .with_context(|| format!("Failed to fetch catalog from {}", source.describe()))?;
    let catalog = parse_catalog_str(&text)
        .with_context(|| format!("Failed to parse catalog from {}", source.describe()))?;

    let repository = RepositoryFactory::create(RepositoryType::from_env(), &cli.data_dir);
    let outcome = run_cycle(config, &catalog, &repository, Some(alerts), Utc::now())
        .context("Watch cycle failed")?;

    println!("{}", outcome.report());
    Ok(outcome)
}

fn notify(config: &WatchConfig, alerts: &PendingAlertStore) -> Result<()> {
    let notifiers = notifiers_from_config(config);
    let delivery = deliver_pending(alerts, &notifiers)
        .context("Alert delivery failed; pending alert kept")?;
    match delivery {
        Delivery::NothingPending => info!("No pending alert"),
        Delivery::Kept => {}
        Delivery::Delivered(entries) => info!(entries, "Alert delivered"),
    }
    Ok(())
}
