//! Verdict Bot
//!
//! Watches the homework status API and reports review status changes to a
//! Telegram chat.
//!
//! Architecture:
//! - Configuration: credentials and timing from the environment (and `.env`)
//! - Repositories: HTTP communication with the status API and Telegram
//! - Scheduler: the poll loop that decides what to report
//!
//! The bot never exits on a failed poll. It stops only on a configuration
//! error at startup or on Ctrl-C.

mod config;
mod repository;
mod scheduler;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verdict_client::StatusClient;
use verdict_core::VerdictTable;

use crate::config::Config;
use crate::repository::{HttpStatusRepository, Notifier, StatusRepository, TelegramNotifier};
use crate::scheduler::StatusPoller;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine, variables may come from the environment
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verdict_bot=info,verdict_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Verdict bot");
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    // Load configuration
    let config = load_config()?;
    info!(
        "Loaded configuration: api_endpoint={}, chat={}, poll_interval={:?}",
        config.api_endpoint, config.channel_destination, config.poll_interval
    );

    let http_client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let window_start = config.initial_window_start(chrono::Utc::now());
    let Config {
        api_token,
        channel_token,
        channel_destination,
        api_endpoint,
        channel_api_url,
        poll_interval,
        ..
    } = config;

    let statuses: Arc<dyn StatusRepository> = Arc::new(HttpStatusRepository::new(
        StatusClient::with_client(api_endpoint, api_token, http_client.clone()),
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        http_client,
        channel_api_url,
        channel_token,
        channel_destination,
    ));

    info!("Clients initialized");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl-C");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                warn!("Unable to listen for Ctrl-C: {}", e);
                // Keep the sender alive so the poller does not read this as shutdown
                std::future::pending::<()>().await;
                drop(shutdown_tx);
            }
        }
    });

    let mut poller = StatusPoller::new(
        statuses,
        notifier,
        VerdictTable::standard(),
        poll_interval,
        window_start,
    );
    poller.run(shutdown_rx).await;

    info!("Verdict bot stopped");
    Ok(())
}

/// Loads and validates configuration; any problem is fatal
fn load_config() -> Result<Config> {
    let config = Config::from_env().and_then(|config| {
        config.validate()?;
        Ok(config)
    });

    match config {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Fatal configuration error: {}", e);
            Err(e).context("Cannot start without a valid configuration")
        }
    }
}
