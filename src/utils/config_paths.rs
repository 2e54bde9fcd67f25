//! Configuration path management
//!
//! - Persistent config lives in `~/.procwarden/`
//! - Runtime data (logs) lives in the system temp dir under `.procwarden/`

use std::path::PathBuf;

use crate::config::{CONFIG_DIRECTORY, CONFIG_FILE_NAME, LOG_FILE_NAME};
use crate::error::ConfigError;

pub struct ConfigPaths {
    /// Persistent config directory (`~/.procwarden/`)
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    /// Default log file (`$TMP/.procwarden/procwarden.log`)
    pub log_file: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home_dir = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        let config_dir = home_dir.join(CONFIG_DIRECTORY);
        let runtime_dir = std::env::temp_dir().join(CONFIG_DIRECTORY);

        Ok(Self {
            config_file: config_dir.join(CONFIG_FILE_NAME),
            log_file: runtime_dir.join(LOG_FILE_NAME),
            config_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_rooted_in_their_directories() {
        let paths = ConfigPaths::new().expect("home directory");
        assert!(paths.config_file.starts_with(&paths.config_dir));
        assert!(paths.config_file.ends_with(CONFIG_FILE_NAME));
        assert!(paths.log_file.starts_with(std::env::temp_dir()));
        assert!(paths.log_file.ends_with(LOG_FILE_NAME));
    }
}
