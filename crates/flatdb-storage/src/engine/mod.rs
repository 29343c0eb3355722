//! Storage engine for managing all tables.
//!
//! This module provides `StorageEngine`, the main entry point for storage
//! operations. Every operation follows the same path:
//!
//! 1. Ask the transaction manager for the current file (snapshot or primary).
//! 2. Read every line of that file.
//! 3. Locate the target table's region.
//! 4. Either hand the region to the query engine, or mutate the lines in
//!    memory and write the whole file back.
//!
//! Validation runs before step 4, so a rejected call never touches the file.

mod validate;

use std::path::PathBuf;

use flatdb_common::constants::HEADER_MARKER;
use flatdb_common::{DbError, DbResult, StoreConfig};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::codec::{encode_value, format_schema, join_row, validate_field, Column};
use crate::file::LineFile;
use crate::locator::{locate, read_schema, table_names};
use crate::query::{self, ResultSet, SelectQuery};
use crate::txn::TransactionManager;

pub use validate::{validate_columns, validate_row_line, validate_table_name};

/// Storage engine over one database file.
///
/// The transaction context is owned by the engine and locked for the whole
/// of each operation, so calls through one engine never interleave. Nothing
/// protects the file from other engines or processes.
#[derive(Debug)]
pub struct StorageEngine {
    /// Configuration the engine was opened with.
    config: StoreConfig,
    /// Transaction slot and the files it switches between.
    txn: Mutex<TransactionManager>,
}

impl StorageEngine {
    /// Opens the store described by `config`.
    ///
    /// Creates an empty database file when it is missing and
    /// `create_if_missing` is set. An existing snapshot is left alone: it may
    /// belong to another engine's open transaction. See
    /// [`discard_stale_snapshot`](Self::discard_stale_snapshot).
    pub fn open(config: StoreConfig) -> DbResult<Self> {
        let primary = LineFile::new(&config.data_file, config.sync_writes);
        let snapshot = LineFile::new(config.effective_snapshot_file(), config.sync_writes);

        if !primary.exists() {
            if !config.create_if_missing {
                return Err(DbError::StoreNotFound {
                    path: config.data_file.clone(),
                });
            }
            primary.create_empty()?;
            info!(path = %config.data_file.display(), "created database file");
        }

        let txn = TransactionManager::new(primary, snapshot);
        if txn.snapshot().exists() {
            warn!(
                snapshot = %txn.snapshot().path().display(),
                "transaction snapshot present, slot is taken until it is committed or discarded"
            );
        }

        info!(path = %config.data_file.display(), "opened database");
        Ok(Self {
            config,
            txn: Mutex::new(txn),
        })
    }

    /// Opens (or creates) the store at `path` with default settings.
    pub fn open_path(path: impl Into<PathBuf>) -> DbResult<Self> {
        Self::open(StoreConfig::with_data_file(path))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Starts a transaction; all later operations target its snapshot.
    pub fn begin_transaction(&self) -> DbResult<()> {
        self.txn.lock().begin()
    }

    /// Publishes the snapshot over the primary file.
    pub fn commit_transaction(&self) -> DbResult<()> {
        self.txn.lock().commit()
    }

    /// Discards the snapshot.
    pub fn rollback_transaction(&self) -> DbResult<()> {
        self.txn.lock().rollback()
    }

    /// Returns true if a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.txn.lock().is_active()
    }

    /// Deletes a snapshot left behind by a crashed process.
    ///
    /// Returns true if one was removed. Does nothing while this engine has a
    /// transaction open. The caller must know that no other engine on the
    /// same file is mid-transaction.
    pub fn discard_stale_snapshot(&self) -> DbResult<bool> {
        self.txn.lock().discard_stale_snapshot()
    }

    // =========================================================================
    // DDL Operations
    // =========================================================================

    /// Creates a table by appending its header, schema and a blank line.
    pub fn create_table(&self, name: &str, columns: &[Column]) -> DbResult<()> {
        validate_table_name(name)?;
        validate_columns(columns)?;

        let txn = self.txn.lock();
        let file = txn.current();
        let mut lines = file.read_lines()?;

        if locate(&lines, name).is_ok() {
            return Err(DbError::TableAlreadyExists {
                table: name.to_string(),
            });
        }

        lines.push(format!("{}{}", HEADER_MARKER, name));
        lines.push(format_schema(columns));
        lines.push(String::new());
        file.write_lines(&lines)?;

        info!(table = name, columns = columns.len(), "created table");
        Ok(())
    }

    /// Removes a table's whole region.
    pub fn drop_table(&self, name: &str) -> DbResult<()> {
        let txn = self.txn.lock();
        let file = txn.current();
        let mut lines = file.read_lines()?;

        let region = locate(&lines, name)?;
        lines.drain(region.as_range());
        file.write_lines(&lines)?;

        info!(table = name, lines = region.len(), "dropped table");
        Ok(())
    }

    /// Replaces the primary file with an empty one.
    ///
    /// # Errors
    ///
    /// `TransactionActive` while a transaction is open: the snapshot would
    /// otherwise resurrect the dropped tables on commit.
    pub fn drop_database(&self) -> DbResult<()> {
        let txn = self.txn.lock();
        if txn.is_active() {
            return Err(DbError::TransactionActive {
                operation: "drop the database",
            });
        }

        let primary = txn.primary();
        primary.remove()?;
        primary.create_empty()?;

        info!(path = %primary.path().display(), "dropped database");
        Ok(())
    }

    // =========================================================================
    // DML Operations
    // =========================================================================

    /// Appends a row at the end of a table's region.
    ///
    /// Each value is converted to its column's canonical form first.
    pub fn insert_data<S: AsRef<str>>(&self, name: &str, values: &[S]) -> DbResult<()> {
        let txn = self.txn.lock();
        let file = txn.current();
        let mut lines = file.read_lines()?;

        let region = locate(&lines, name)?;
        let columns = read_schema(&lines, region)?;

        if values.len() != columns.len() {
            return Err(DbError::ArityMismatch {
                table: name.to_string(),
                expected: columns.len(),
                actual: values.len(),
            });
        }

        for (column, value) in columns.iter().zip(values) {
            validate_field(&column.name, value.as_ref())?;
        }

        let encoded = columns
            .iter()
            .zip(values)
            .map(|(column, value)| encode_value(column.column_type, value.as_ref()))
            .collect::<DbResult<Vec<_>>>()?;

        let line = join_row(&encoded);
        if let Some(first) = columns.first() {
            validate_row_line(&first.name, &line)?;
        }

        lines.insert(region.end, line);
        file.write_lines(&lines)?;

        debug!(table = name, line = region.end, "inserted row");
        Ok(())
    }

    /// Runs a select and returns the fully materialized result.
    pub fn select(&self, query: &SelectQuery<'_>) -> DbResult<ResultSet> {
        let txn = self.txn.lock();
        let lines = txn.current().read_lines()?;

        let region = locate(&lines, query.table())?;
        query::execute(&lines, region, query)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Lists table names in file order.
    pub fn list_tables(&self) -> DbResult<Vec<String>> {
        let txn = self.txn.lock();
        let lines = txn.current().read_lines()?;
        Ok(table_names(&lines))
    }

    /// Returns a table's columns.
    pub fn describe_table(&self, name: &str) -> DbResult<Vec<Column>> {
        let txn = self.txn.lock();
        let lines = txn.current().read_lines()?;

        let region = locate(&lines, name)?;
        read_schema(&lines, region)
    }

    /// Checks if a table exists.
    pub fn table_exists(&self, name: &str) -> DbResult<bool> {
        let txn = self.txn.lock();
        let lines = txn.current().read_lines()?;
        Ok(locate(&lines, name).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ColumnType;
    use std::fs;
    use tempfile::TempDir;

    fn users_columns() -> Vec<Column> {
        vec![
            Column::new("id", ColumnType::Integer),
            Column::new("name", ColumnType::Text),
            Column::new("active", ColumnType::Boolean),
        ]
    }

    fn open(tmp: &TempDir) -> StorageEngine {
        StorageEngine::open_path(tmp.path().join("db.txt")).unwrap()
    }

    fn all_rows(engine: &StorageEngine, table: &str) -> Vec<Vec<Option<String>>> {
        engine
            .select(&SelectQuery::new(table))
            .unwrap()
            .into_values()
    }

    #[test]
    fn test_open_creates_file() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);
        assert!(tmp.path().join("db.txt").exists());
        assert!(engine.list_tables().unwrap().is_empty());
    }

    #[test]
    fn test_open_missing_without_create() {
        let tmp = TempDir::new().unwrap();
        let config = StoreConfig::builder()
            .data_file(tmp.path().join("db.txt"))
            .create_if_missing(false)
            .build();
        assert!(matches!(
            StorageEngine::open(config),
            Err(DbError::StoreNotFound { .. })
        ));
    }

    #[test]
    fn test_create_table_layout() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);

        engine.create_table("users", &users_columns()).unwrap();
        engine.insert_data("users", &["1", "Alice", "true"]).unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("db.txt")).unwrap(),
            "#users\nid:Integer|name:Text|active:Boolean\n\n1|Alice|true\n"
        );
    }

    #[test]
    fn test_create_duplicate_table() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);

        engine.create_table("users", &users_columns()).unwrap();
        let before = fs::read(tmp.path().join("db.txt")).unwrap();

        let err = engine.create_table("USERS", &users_columns()).unwrap_err();
        assert!(matches!(err, DbError::TableAlreadyExists { .. }));
        assert_eq!(fs::read(tmp.path().join("db.txt")).unwrap(), before);
    }

    #[test]
    fn test_create_invalid() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);

        assert!(matches!(
            engine.create_table("a#b", &users_columns()),
            Err(DbError::InvalidName { .. })
        ));
        assert!(matches!(
            engine.create_table("t", &[]),
            Err(DbError::InvalidColumns { .. })
        ));
        assert!(engine.list_tables().unwrap().is_empty());
    }

    #[test]
    fn test_insert_checks() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);
        engine.create_table("users", &users_columns()).unwrap();

        assert!(matches!(
            engine.insert_data("nobody", &["1", "a", "true"]),
            Err(DbError::TableNotFound { .. })
        ));
        assert!(matches!(
            engine.insert_data("users", &["1", "a"]),
            Err(DbError::ArityMismatch { expected: 3, actual: 2, .. })
        ));
        assert!(matches!(
            engine.insert_data("users", &["x", "a|b", "true"]),
            Err(DbError::InvalidValue { .. })
        ));
        assert!(matches!(
            engine.insert_data("users", &["x", "a", "true"]),
            Err(DbError::TypeMismatch { .. })
        ));
        assert!(all_rows(&engine, "users").is_empty());
    }

    #[test]
    fn test_insert_canonicalizes() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);
        engine.create_table("users", &users_columns()).unwrap();

        engine.insert_data("users", &["007", "Bond", "TRUE"]).unwrap();
        assert_eq!(
            all_rows(&engine, "users"),
            vec![vec![
                Some("7".to_string()),
                Some("Bond".to_string()),
                Some("true".to_string())
            ]]
        );
    }

    #[test]
    fn test_insert_rejects_unreadable_rows() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);
        engine
            .create_table("notes", &[Column::new("body", ColumnType::Text)])
            .unwrap();

        assert!(matches!(
            engine.insert_data("notes", &[""]),
            Err(DbError::InvalidValue { .. })
        ));
        assert!(matches!(
            engine.insert_data("notes", &["#heading"]),
            Err(DbError::InvalidValue { .. })
        ));
        assert!(engine.list_tables().unwrap() == vec!["notes".to_string()]);
    }

    #[test]
    fn test_insert_lands_in_own_region() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);
        engine.create_table("a", &[Column::new("x", ColumnType::Integer)]).unwrap();
        engine.create_table("b", &[Column::new("y", ColumnType::Integer)]).unwrap();

        engine.insert_data("a", &["1"]).unwrap();
        engine.insert_data("b", &["2"]).unwrap();
        engine.insert_data("a", &["3"]).unwrap();

        assert_eq!(
            all_rows(&engine, "a"),
            vec![vec![Some("1".to_string())], vec![Some("3".to_string())]]
        );
        assert_eq!(all_rows(&engine, "b"), vec![vec![Some("2".to_string())]]);
    }

    #[test]
    fn test_drop_table() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);
        engine.create_table("a", &[Column::new("x", ColumnType::Integer)]).unwrap();
        engine.create_table("b", &[Column::new("y", ColumnType::Integer)]).unwrap();
        engine.insert_data("b", &["2"]).unwrap();

        engine.drop_table("A").unwrap();
        assert_eq!(engine.list_tables().unwrap(), vec!["b".to_string()]);
        assert!(!engine.table_exists("a").unwrap());
        assert!(matches!(
            engine.drop_table("a"),
            Err(DbError::TableNotFound { .. })
        ));
        assert_eq!(all_rows(&engine, "b"), vec![vec![Some("2".to_string())]]);
    }

    #[test]
    fn test_drop_database() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);
        engine.create_table("a", &[Column::new("x", ColumnType::Integer)]).unwrap();

        engine.begin_transaction().unwrap();
        assert!(matches!(
            engine.drop_database(),
            Err(DbError::TransactionActive { .. })
        ));
        engine.rollback_transaction().unwrap();

        engine.drop_database().unwrap();
        assert!(engine.list_tables().unwrap().is_empty());
        assert_eq!(fs::read_to_string(tmp.path().join("db.txt")).unwrap(), "");
    }

    #[test]
    fn test_describe_table() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);
        engine.create_table("users", &users_columns()).unwrap();

        assert_eq!(engine.describe_table("Users").unwrap(), users_columns());
        assert!(matches!(
            engine.describe_table("x"),
            Err(DbError::TableNotFound { .. })
        ));
    }

    #[test]
    fn test_transaction_routes_writes_to_snapshot() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);
        engine.create_table("users", &users_columns()).unwrap();

        engine.begin_transaction().unwrap();
        assert!(engine.in_transaction());
        engine.insert_data("users", &["1", "Alice", "true"]).unwrap();
        assert_eq!(all_rows(&engine, "users").len(), 1);

        let primary = fs::read_to_string(tmp.path().join("db.txt")).unwrap();
        assert!(!primary.contains("Alice"));

        engine.commit_transaction().unwrap();
        assert!(!engine.in_transaction());
        let primary = fs::read_to_string(tmp.path().join("db.txt")).unwrap();
        assert!(primary.contains("Alice"));
    }

    #[test]
    fn test_open_keeps_existing_snapshot() {
        let tmp = TempDir::new().unwrap();
        let stale = tmp.path().join("db.txt.txn");
        fs::write(&stale, "#ghost\nx:Text\n").unwrap();

        let engine = open(&tmp);
        assert!(stale.exists());
        assert!(!engine.table_exists("ghost").unwrap());
        assert!(matches!(
            engine.begin_transaction(),
            Err(DbError::TransactionAlreadyOpen)
        ));

        assert!(engine.discard_stale_snapshot().unwrap());
        assert!(!stale.exists());
        engine.begin_transaction().unwrap();
        assert!(!engine.discard_stale_snapshot().unwrap());
    }

    #[test]
    fn test_second_engine_leaves_open_transaction_alone() {
        let tmp = TempDir::new().unwrap();
        let first = open(&tmp);
        first.create_table("users", &users_columns()).unwrap();

        first.begin_transaction().unwrap();
        first.insert_data("users", &["1", "Alice", "true"]).unwrap();

        let second = open(&tmp);
        assert!(tmp.path().join("db.txt.txn").exists());
        assert_eq!(all_rows(&first, "users").len(), 1);
        assert!(all_rows(&second, "users").is_empty());
        assert!(matches!(
            second.begin_transaction(),
            Err(DbError::TransactionAlreadyOpen)
        ));

        first.commit_transaction().unwrap();
        assert_eq!(all_rows(&second, "users").len(), 1);
        second.begin_transaction().unwrap();
    }

    #[test]
    fn test_create_rejects_header_like_column() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);

        let err = engine
            .create_table("t", &[Column::new("#tag", ColumnType::Text)])
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidColumns { .. }));
        assert!(engine.list_tables().unwrap().is_empty());
        assert_eq!(fs::read_to_string(tmp.path().join("db.txt")).unwrap(), "");

        engine
            .create_table("t", &[Column::new("a#tag", ColumnType::Text)])
            .unwrap();
        engine.insert_data("t", &["x"]).unwrap();
        assert_eq!(engine.list_tables().unwrap(), vec!["t".to_string()]);
        assert_eq!(all_rows(&engine, "t"), vec![vec![Some("x".to_string())]]);
    }

    #[test]
    fn test_create_rejects_padded_column_names() {
        let tmp = TempDir::new().unwrap();
        let engine = open(&tmp);

        for name in [" id", "id ", " "] {
            let err = engine
                .create_table("t", &[Column::new(name, ColumnType::Integer)])
                .unwrap_err();
            assert!(matches!(err, DbError::InvalidColumns { .. }), "{:?}", name);
        }
        assert!(engine.list_tables().unwrap().is_empty());

        engine
            .create_table("t", &[Column::new("id", ColumnType::Integer)])
            .unwrap();
        assert_eq!(
            engine.describe_table("t").unwrap(),
            vec![Column::new("id", ColumnType::Integer)]
        );
    }
}
