// fest - terminal client for the college festival events API
//
// Architecture:
// - API client (reqwest): category catalog, event collections, profile
// - Loader: one background task per route change, results tagged by generation
// - TUI (ratatui): home catalog, filtered event listing, detail overlay
// - CLI (clap): headless listing, session login/logout, profile, config
// - Config: env > ~/.config/fest/config.toml > defaults

mod api;
mod cli;
mod config;
mod filter;
mod format;
mod loader;
mod logging;
mod model;
mod profile;
mod session;
mod theme;
mod tui;

use anyhow::{Context, Result};
use api::ApiClient;
use clap::Parser;
use cli::Cli;
use config::{Config, LogRotation, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) if cli.command.as_ref().is_some_and(|c| c.repairs_config()) => {
            eprintln!("Warning: {:#}", e);
            Config::default()
        }
        Err(e) => return Err(e),
    };

    let log_buffer = LogBuffer::new();
    let tui_mode = cli.command.is_none();

    // The guard must stay alive until exit so buffered file logs flush
    let _file_guard = init_tracing(&config.logging, tui_mode, &log_buffer);

    match cli.command {
        Some(command) => cli::handle_cli(command, &config).await,
        None => {
            let api = ApiClient::new(&config.api_url, config.request_timeout())
                .with_context(|| format!("Invalid API URL: {}", config.api_url))?;
            tui::run_tui(&config, log_buffer, Arc::new(api)).await
        }
    }
}

/// Install the global subscriber
///
/// TUI mode captures logs into the buffer (stdout belongs to the terminal UI);
/// subcommands log to stderr. File logging adds a JSON layer to either.
/// Precedence: RUST_LOG > config file > default "info".
fn init_tracing(
    logging: &LoggingConfig,
    tui_mode: bool,
    log_buffer: &LogBuffer,
) -> Option<WorkerGuard> {
    let default_filter = format!("fest={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let console_layer = if tui_mode {
        TuiLogLayer::new(log_buffer.clone()).boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match file_writer(logging) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

/// Non-blocking rolling file writer, if file logging is enabled and usable
fn file_writer(
    logging: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    Some(tracing_appender::non_blocking(appender))
}
