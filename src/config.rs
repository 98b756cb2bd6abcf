//! Configuration loading and management
//!
//! Handles parsing of the `config.toml` file in the data directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::view::Filter;

/// Config file name inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Listing configuration
    #[serde(default)]
    pub list: ListConfig,
}

/// Storage-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the storage file (defaults to the platform data
    /// directory)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Listing-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListConfig {
    /// Default filter for `tasks ls` and the interactive UI
    #[serde(default)]
    pub filter: Filter,
}

impl Config {
    /// Load configuration from a `config.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a data directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.storage.dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(
                    "storage.dir cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
