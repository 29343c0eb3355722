//! Store configuration.
//!
//! The backing file path is supplied by the embedding application; the
//! remaining knobs control snapshot placement and write behavior.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DATA_FILE, SNAPSHOT_EXTENSION};
use crate::error::{DbError, DbResult};

/// Configuration for a file-backed store.
///
/// # Example
///
/// ```rust
/// use flatdb_common::config::StoreConfig;
/// use std::path::PathBuf;
///
/// let config = StoreConfig::with_data_file("/tmp/app.txt");
/// assert_eq!(config.effective_snapshot_file(), PathBuf::from("/tmp/app.txt.txn"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Primary database file.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Transaction snapshot file (defaults to `<data_file>.txn`).
    #[serde(default)]
    pub snapshot_file: Option<PathBuf>,

    /// Create an empty database file when it does not exist.
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,

    /// Fsync after every whole-file write.
    #[serde(default)]
    pub sync_writes: bool,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_create_if_missing() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            snapshot_file: None,
            create_if_missing: default_create_if_missing(),
            sync_writes: false,
        }
    }
}

impl StoreConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration for the given database file.
    #[must_use]
    pub fn with_data_file(path: impl Into<PathBuf>) -> Self {
        Self {
            data_file: path.into(),
            ..Default::default()
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> DbResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| DbError::invalid_config(format!("{}: {}", path.display(), e)))
    }

    /// Saves configuration to a TOML file.
    pub fn save(&self, path: &Path) -> DbResult<()> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Converts configuration to a TOML string.
    pub fn to_toml(&self) -> DbResult<String> {
        toml::to_string_pretty(self).map_err(|e| DbError::invalid_config(e.to_string()))
    }

    /// Returns the snapshot path, deriving it from the data file if unset.
    pub fn effective_snapshot_file(&self) -> PathBuf {
        self.snapshot_file.clone().unwrap_or_else(|| {
            let mut name = OsString::from(self.data_file.as_os_str());
            name.push(".");
            name.push(SNAPSHOT_EXTENSION);
            PathBuf::from(name)
        })
    }

    /// Creates a builder for configuration.
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }
}

/// Builder for store configuration.
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the database file.
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Sets an explicit snapshot file.
    pub fn snapshot_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.snapshot_file = Some(path.into());
        self
    }

    /// Controls whether a missing database file is created.
    pub fn create_if_missing(mut self, enabled: bool) -> Self {
        self.config.create_if_missing = enabled;
        self
    }

    /// Controls fsync after writes.
    pub fn sync_writes(mut self, enabled: bool) -> Self {
        self.config.sync_writes = enabled;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> StoreConfig {
        self.config
    }
}
