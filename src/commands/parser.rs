//! Command line parsing
//!
//! clap derive definitions for the procwarden CLI.

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Procwarden - process monitor that ranks processes by owner importance
#[derive(Parser, Debug, Clone)]
#[command(
    name = "procwarden",
    about = "Process monitor: list, search and terminate processes grouped by importance",
    version
)]
pub struct Cli {
    /// Config file (default: ~/.procwarden/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `procwarden=trace`
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive process monitor (default)
    Tui {
        /// Start with this search applied
        #[arg(long, value_name = "TERM")]
        search: Option<String>,
    },

    /// Print processes grouped by importance and exit
    #[command(alias = "ls")]
    List {
        /// Only list processes whose name contains TERM (case-insensitive)
        #[arg(long, value_name = "TERM")]
        search: Option<String>,
    },

    /// Terminate a process and wait for it to exit
    Kill {
        #[arg(value_name = "PID")]
        pid: u32,
        /// Seconds to wait for exit (default from config, 3)
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },
}

impl Cli {
    /// Parse argv, exiting on error.
    pub fn parse_args() -> Self {
        Self::parse_from_args(std::env::args_os())
    }

    pub fn try_parse_args_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(iter)
    }

    pub fn parse_from_args<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_args_from(iter) {
            Ok(cli) => cli,
            Err(err) => err.exit(),
        }
    }

    /// The command to run; no subcommand means the TUI.
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Tui { search: None })
    }
}
