//! Towerwatch Dashboard
//!
//! Terminal status board for a tower controller's fleet.
//!
//! Architecture:
//! - Configuration: command line and environment
//! - Repository: HTTP reads of `/jobs` and `/runners`
//! - Store: last known good snapshot of both collections
//! - Scheduler: fixed-interval poller feeding the store
//! - View: renders the snapshot as two tables
//!
//! The screen is redrawn every time a poll installs a new snapshot. Failed
//! polls are logged to stderr and the previous tables stay up.

mod config;
mod repository;
mod scheduler;
mod store;
mod view;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::{FleetRepository, HttpFleetRepository};
use crate::scheduler::Poller;
use crate::store::SnapshotStore;
use towerwatch_client::TowerClient;
use towerwatch_core::domain::snapshot::Snapshot;

#[derive(Parser)]
#[command(name = "towerwatch")]
#[command(about = "Live view of tower controller runners and jobs", long_about = None)]
struct Cli {
    /// Tower controller URL
    #[arg(long, env = "TOWER_URL", default_value = "http://localhost:8080")]
    tower_url: String,

    /// Poll interval in milliseconds
    #[arg(long, env = "POLL_INTERVAL_MS", default_value_t = 5000)]
    interval_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Poll once, print the tables and exit
    #[arg(long)]
    once: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            tower_url: cli.tower_url,
            poll_interval: Duration::from_millis(cli.interval_ms),
            request_timeout: Duration::from_secs(cli.timeout_secs),
            once: cli.once,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the tables
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "towerwatch_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from(Cli::parse());
    config.validate()?;
    info!(
        "Loaded configuration: tower_url={}, poll_interval={:?}",
        config.tower_url, config.poll_interval
    );

    let client = TowerClient::with_timeout(config.tower_url.clone(), config.request_timeout)
        .context("Failed to build HTTP client")?;
    let repository: Arc<dyn FleetRepository> = Arc::new(HttpFleetRepository::new(client));

    let store = SnapshotStore::new();
    let poller = Poller::new(repository, store.clone());

    if config.once {
        let summary = poller.poll_once().await.context("Poll failed")?;
        info!(
            "Fetched {} job(s) and {} runner(s)",
            summary.jobs, summary.runners
        );
        print!("{}", view::render(&store.current()));
        return Ok(());
    }

    run(&config, &poller).await
}

/// Redraws on every snapshot change until Ctrl-C
async fn run(config: &Config, poller: &Poller) -> Result<()> {
    let mut watcher = poller.store().subscribe();
    let mut handle = poller
        .start(config.poll_interval)
        .context("Failed to start poller")?;

    draw(config, poller.store(), &watcher.current());

    while handle.is_running() {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                info!("Received Ctrl-C, shutting down");
                handle.stop();
            }
            changed = watcher.changed() => match changed {
                Some(snapshot) => draw(config, poller.store(), &snapshot),
                None => handle.stop(),
            },
        }
    }

    let failures = poller.consecutive_failures();
    if failures > 0 {
        info!("Last {} poll(s) before shutdown failed", failures);
    }
    Ok(())
}

fn draw(config: &Config, store: &SnapshotStore, snapshot: &Snapshot) {
    // Clear screen and home the cursor
    print!("\x1b[2J\x1b[H");
    println!("{}", "TCR Dashboard".bold());
    println!(
        "{}",
        format!(
            "{}  snapshot #{}  drawn {}",
            config.tower_url,
            store.generation(),
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        )
        .dimmed()
    );
    println!();
    print!("{}", view::render(snapshot));
}
