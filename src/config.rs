//! Configuration for Stockroom
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, StockError};

/// Main configuration for an inventory store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Mirror file holding the whole inventory, one record per line.
    /// Saves go through a sibling `{data_file}.tmp` that is renamed over it.
    pub data_file: PathBuf,

    /// fsync the temporary file before renaming it into place
    pub fsync_on_save: bool,

    // -------------------------------------------------------------------------
    // Behaviour
    // -------------------------------------------------------------------------
    /// Save after every successful mutation instead of only on request
    pub autosave: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("inventory.txt"),
            fsync_on_save: true,
            autosave: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject configurations that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(StockError::Config("data file path is empty".to_string()));
        }
        if self.data_file.file_name().is_none() {
            return Err(StockError::Config(format!(
                "data file path has no file name: {}",
                self.data_file.display()
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the mirror file path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Enable or disable fsync before the atomic rename
    pub fn fsync_on_save(mut self, enabled: bool) -> Self {
        self.config.fsync_on_save = enabled;
        self
    }

    /// Enable or disable saving after every mutation
    pub fn autosave(mut self, enabled: bool) -> Self {
        self.config.autosave = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
