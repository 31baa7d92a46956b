//! Homework Status Bot - Main Entry Point
//!
//! Polls the homework review API and reports status changes to a
//! Telegram chat.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use homework_status_bot::config::{Credentials, PollerSettings};
use homework_status_bot::logging::rotating_log_file;
use homework_status_bot::practicum::PracticumClient;
use homework_status_bot::scheduler::{PollState, PollerMessage, StatusPoller, format_timestamp};
use homework_status_bot::telegram::TelegramNotifier;

/// Telegram bot reporting homework review status changes.
#[derive(Parser, Debug)]
#[command(name = "homework_bot")]
#[command(about = "Report homework review status changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Unix timestamp to request changes from on the first poll.
    #[arg(long, default_value_t = 0)]
    from_date: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables before anything reads them
    let env_loaded = dotenvy::from_filename(&args.env_file);

    let settings = PollerSettings::from_env_with_defaults();

    // Initialize logging
    let _log_guard = init_logging(&args.log_level, &settings)?;

    if let Err(e) = env_loaded {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            error!("Bot stopped: required configuration is missing");
            return Ok(());
        }
    };
    debug!("Loaded credentials: {:?}", credentials);

    let api = PracticumClient::from_config(&credentials, &settings)
        .context("Failed to create review API client")?;
    info!("Polling {}", api.endpoint());

    let notifier = TelegramNotifier::from_credentials(&credentials);

    let mut poller = StatusPoller::new(api, notifier, PollState::new(args.from_date))
        .with_retry_period(settings.retry_period());

    poller
        .notify_startup()
        .await
        .context("Failed to send startup message")?;

    info!(
        "Starting homework bot from {}...",
        format_timestamp(args.from_date)
    );

    let (poller_tx, poller_rx) = mpsc::channel::<PollerMessage>(1);

    let poller_handle = tokio::spawn(async move {
        poller.run(poller_rx).await;
    });

    info!("Bot is running. Use Ctrl+C to stop.");

    // Wait for Ctrl+C
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
    } else {
        info!("Received Ctrl+C, shutting down...");
    }

    let _ = poller_tx.send(PollerMessage::Shutdown).await;
    let _ = poller_handle.await;

    Ok(())
}

/// Initializes console logging plus a size-capped rotating log file.
///
/// The returned guard flushes the file writer when dropped and must be
/// kept alive for the whole program.
fn init_logging(level: &str, settings: &PollerSettings) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = rotating_log_file(settings)
        .with_context(|| format!("Failed to open log directory {}", settings.log_dir.display()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(log_file);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    Ok(guard)
}
