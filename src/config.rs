//! Configuration for Rollbook
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Default backing file name
pub const DEFAULT_DATA_FILE: &str = "students.json";

/// Default `strftime` pattern for `date_created` / `date_updated`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Main configuration for a RecordStore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// JSON file holding the whole collection.
    /// Read once on open, rewritten in full after every mutation.
    pub data_file: PathBuf,

    // -------------------------------------------------------------------------
    // Record Configuration
    // -------------------------------------------------------------------------
    /// Format used when stamping records (local time)
    pub timestamp_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing JSON file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the timestamp format
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.config.timestamp_format = format.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
