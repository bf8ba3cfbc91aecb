//! DXWatch Spotter - Main entry point
//!
//! Connects to a DX cluster, classifies every spot in the feed, and prints
//! alert lines for new DXCC entities and watched callsigns to stdout.
//! Operational logs go to stderr so alert output stays pipeable.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dxwatch_common::config::Config;
use dxwatch_spotter::classifier::SpotClassifier;
use dxwatch_spotter::cluster::ClusterSession;
use dxwatch_spotter::matrix::WorkMatrix;
use dxwatch_spotter::novelty::NoveltyTracker;
use dxwatch_spotter::services::{ClubLogClient, EntityLookup};
use dxwatch_spotter::watchlist::WatchList;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(300);

/// Command-line arguments for dxwatch-spotter
#[derive(Parser, Debug)]
#[command(name = "dxwatch-spotter")]
#[command(about = "DX cluster watcher for new DXCC entities and watched callsigns")]
#[command(version)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "dxwatch.toml", env = "DXWATCH_CONFIG")]
    config: PathBuf,

    /// Override the configured novelty cooldown, in seconds
    #[arg(long)]
    cooldown_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    // Initialize tracing; RUST_LOG wins over the configured level. Logs go
    // to stderr, alert lines to stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting DXWatch Spotter v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let cooldown = Duration::from_secs(args.cooldown_secs.unwrap_or(config.cooldown_secs));
    info!(
        "Watching for new DXCC entities (cooldown {}s) and {} watched callsigns",
        cooldown.as_secs(),
        config.watchlist.len()
    );

    let resolver = ClubLogClient::new(
        config.clublog.api_key.clone(),
        Duration::from_secs(config.lookup_timeout_secs),
    )
    .context("Failed to build ClubLog client")?;

    let mut classifier = SpotClassifier::new(
        resolver,
        NoveltyTracker::new(cooldown),
        WorkMatrix::new(&config.matrix_path),
        WatchList::new(config.watchlist.clone(), config.watchlist_case_insensitive),
    );

    let mut backoff = INITIAL_BACKOFF;
    loop {
        let session_result = tokio::select! {
            _ = shutdown_signal() => break,
            result = run_session(&config, &mut classifier) => result,
        };

        match session_result {
            Ok(()) => {
                info!("Cluster session closed by remote");
                backoff = INITIAL_BACKOFF;
            }
            Err(e) => {
                warn!("Cluster session failed: {}", e);
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
        }

        // A fresh session starts with a clean suppression slate; repeating
        // an alert early is acceptable, losing one is not.
        classifier.reset();

        info!("Reconnecting in {}s", backoff.as_secs());
        tokio::select! {
            _ = shutdown_signal() => break,
            _ = tokio::time::sleep(backoff) => {}
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// One cluster session: connect, log in, classify the feed until it ends.
async fn run_session<L: EntityLookup>(
    config: &Config,
    classifier: &mut SpotClassifier<L>,
) -> dxwatch_spotter::Result<()> {
    let mut session = ClusterSession::connect(
        &config.cluster.host,
        config.cluster.port,
        &config.cluster.callsign,
    )
    .await?;

    while let Some(line) = session.next_line().await? {
        for alert in classifier.classify_line(&line).await {
            println!("{}", alert);
        }
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
