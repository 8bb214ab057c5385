//! Configuration file support
//!
//! Settings load from `./cardcrop.toml` in the working directory, falling
//! back to the user config directory. CLI arguments override file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::background::DEFAULT_TOLERANCE;

/// Local config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "cardcrop.toml";

/// Config error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistent settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Per-channel background tolerance (0-255)
    pub tolerance: u8,
    /// Worker thread count (omit for one per logical CPU)
    pub threads: Option<usize>,
    /// Always reprocess, ignoring existing outputs
    pub force: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            threads: None,
            force: false,
        }
    }
}

impl Config {
    /// Load from the standard locations, or defaults when no file exists
    pub fn load() -> Result<Self, ConfigError> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from_path(&local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join("cardcrop/config.toml");
            if user.exists() {
                return Self::load_from_path(&user);
            }
        }

        Ok(Self::default())
    }

    /// Load from an explicit path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Merge with CLI arguments; CLI takes precedence where set
    pub fn merge_with_cli(&self, overrides: &CliOverrides) -> Config {
        Config {
            tolerance: overrides.tolerance.unwrap_or(self.tolerance),
            threads: overrides.threads.or(self.threads),
            force: overrides.force.unwrap_or(self.force),
        }
    }
}

/// CLI values that override the config file when explicitly set
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub tolerance: Option<u8>,
    pub threads: Option<usize>,
    pub force: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}
