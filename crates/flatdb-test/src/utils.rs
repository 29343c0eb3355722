//! Fixtures shared by the end-to-end tests.

use std::fs;
use std::path::{Path, PathBuf};

use flatdb_common::config::StoreConfigBuilder;
use flatdb_common::{DbResult, StoreConfig};
use flatdb_storage::{Column, ColumnType, SelectQuery, StorageEngine};
use tempfile::TempDir;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber honoring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A database file in its own temporary directory.
///
/// The directory, and with it the database, is removed on drop.
pub struct TestStore {
    dir: TempDir,
    engine: StorageEngine,
}

impl TestStore {
    /// Opens an empty store with default settings.
    pub fn new() -> DbResult<Self> {
        Self::with_config(|builder| builder)
    }

    /// Opens an empty store, letting the caller adjust the configuration.
    pub fn with_config(
        configure: impl FnOnce(StoreConfigBuilder) -> StoreConfigBuilder,
    ) -> DbResult<Self> {
        init_tracing();
        let dir = TempDir::new()?;
        let builder = StoreConfig::builder().data_file(dir.path().join("flatdb.txt"));
        let engine = StorageEngine::open(configure(builder).build())?;
        info!(dir = %dir.path().display(), "opened test store");
        Ok(Self { dir, engine })
    }

    /// Returns the engine.
    pub fn engine(&self) -> &StorageEngine {
        &self.engine
    }

    /// Returns the temporary directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the primary database file path.
    pub fn data_file(&self) -> PathBuf {
        self.engine.config().data_file.clone()
    }

    /// Reads the raw bytes of the primary database file.
    pub fn primary_bytes(&self) -> Vec<u8> {
        fs::read(self.data_file()).unwrap_or_default()
    }

    /// Opens a second engine on the same file.
    pub fn reopen(&self) -> DbResult<StorageEngine> {
        StorageEngine::open_path(self.data_file())
    }

    /// Selects every row of `table`, in file order, as plain strings.
    pub fn rows(&self, table: &str) -> DbResult<Vec<Vec<Option<String>>>> {
        Ok(self.engine.select(&SelectQuery::new(table))?.into_values())
    }
}

/// Columns of the `users` table used across the tests.
pub fn users_columns() -> Vec<Column> {
    vec![
        Column::new("id", ColumnType::Integer),
        Column::new("name", ColumnType::Text),
        Column::new("active", ColumnType::Boolean),
    ]
}

/// Converts string literals into an expected result.
pub fn expected(rows: &[&[&str]]) -> Vec<Vec<Option<String>>> {
    rows.iter()
        .map(|row| row.iter().map(|v| Some((*v).to_string())).collect())
        .collect()
}
