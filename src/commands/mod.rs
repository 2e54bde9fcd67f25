//! Command dispatch
//!
//! Loads configuration, sets up logging and routes to the TUI, `list` or
//! `kill`.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

pub mod list;
pub mod parser;

pub use parser::{Cli, Commands};

use crate::config::Config;
use crate::monitor::ViewController;
use crate::platform::SystemProcessTable;
use crate::tui::app::{run_tui_app, session_from_config};
use crate::utils::config_paths::ConfigPaths;
use crate::utils::logger::init_logger;

pub fn run(cli: Cli) -> Result<ExitCode> {
    let paths = ConfigPaths::new();
    let config_path = cli
        .config
        .clone()
        .or_else(|| paths.as_ref().ok().map(|p| p.config_file.clone()));
    let (config, config_error) = match config_path {
        Some(path) => match Config::load(&path) {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(format!("{}: {}", path.display(), err))),
        },
        None => (Config::default(), None),
    };

    let command = cli.command();
    let log_level = cli.log_level.as_deref().or(config.log_level.as_deref());
    let log_file = config
        .log_file
        .clone()
        .or_else(|| paths.as_ref().ok().map(|p| p.log_file.clone()));
    let console = !matches!(command, Commands::Tui { .. });
    if let Err(err) = init_logger(log_level, log_file, console) {
        eprintln!("Failed to initialize logging: {}", err);
    }
    if let Some(err) = config_error {
        warn!("Failed to load config {}, using defaults", err);
    }

    match command {
        Commands::Tui { search } => {
            color_eyre::install().map_err(|e| anyhow::anyhow!("Failed to install color_eyre: {}", e))?;
            run_tui_app(&config, search)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::List { search } => {
            let mut controller = ViewController::new(
                SystemProcessTable::new(),
                session_from_config(&config),
                config.terminate_timeout(),
            );
            list::run_list(&mut controller, search.as_deref(), &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Kill { pid, timeout } => {
            let timeout = timeout
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.terminate_timeout());
            let mut controller = ViewController::new(
                SystemProcessTable::new(),
                session_from_config(&config),
                timeout,
            );
            let result = controller.terminate_process(pid);
            if let Some(notification) = controller.notification() {
                match result {
                    Ok(()) => println!("{}", notification.message),
                    Err(_) => eprintln!("{}: {}", notification.title, notification.message),
                }
            }
            Ok(if result.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
    }
}
