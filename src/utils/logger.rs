//! Logging setup
//!
//! Console output goes to stderr so it never mixes with `list` output. While
//! the TUI owns the terminal the console layer must stay off; the file layer
//! is then the only sink.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::DEFAULT_LOG_FILTER;

/// Initialise the global subscriber.
///
/// # Arguments
/// * `log_level` - filter directive (`debug`, `procwarden=trace`, ...); when
///   `None`, `RUST_LOG` is used, then [`DEFAULT_LOG_FILTER`]
/// * `log_file` - append logs to this file as well
/// * `console` - also write to stderr
pub fn init_logger(log_level: Option<&str>, log_file: Option<PathBuf>, console: bool) -> Result<()> {
    let env_filter = if let Some(level) = log_level {
        EnvFilter::try_new(level)?
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    let console_layer = console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .compact()
    });

    let file_layer = match log_file {
        Some(log_path) => {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)?;
            Some(
                fmt::layer()
                    .with_writer(std::sync::Arc::new(file))
                    .with_target(true)
                    .with_ansi(false)
                    .with_level(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!("Logger initialized");
    Ok(())
}
