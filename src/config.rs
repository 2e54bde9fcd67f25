//! Runtime configuration
//!
//! Loaded from `~/.procwarden/config.json`. Every key is optional; a missing
//! file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::platform::DEFAULT_PRIVILEGED_ACCOUNT;

pub const CONFIG_DIRECTORY: &str = ".procwarden";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "procwarden.log";

pub const DEFAULT_TERMINATE_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_LOG_FILTER: &str = "warn,procwarden=info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Owner name treated as the superuser (High importance).
    pub privileged_account: String,
    /// How long a terminate request waits for the process to exit.
    pub terminate_timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            privileged_account: DEFAULT_PRIVILEGED_ACCOUNT.to_string(),
            terminate_timeout_secs: DEFAULT_TERMINATE_TIMEOUT_SECS,
            log_level: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content).map_err(|err| ConfigError::InvalidFormat {
            message: err.to_string(),
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let payload = serde_json::to_string_pretty(self).map_err(|err| ConfigError::Io {
            message: err.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, payload)?;
        Ok(())
    }

    pub fn terminate_timeout(&self) -> Duration {
        Duration::from_secs(self.terminate_timeout_secs)
    }
}
