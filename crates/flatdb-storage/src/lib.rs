//! # flatdb-storage
//!
//! Line-oriented storage engine for FlatDB.
//!
//! A database is a single UTF-8 text file holding any number of tables.
//! Each table is a header line (`#name`), a schema line
//! (`id:Integer|name:Text`) and one `|`-delimited line per row. This crate
//! provides:
//! - The value and schema codec
//! - Table region location inside the file
//! - Project / filter / order-by selects
//! - Snapshot-copy transactions
//! - `StorageEngine`, the facade tying these together
//!
//! # Example
//!
//! ```rust,no_run
//! use flatdb_storage::{Column, ColumnType, SelectQuery, StorageEngine};
//!
//! # fn main() -> flatdb_common::DbResult<()> {
//! let engine = StorageEngine::open_path("flatdb.txt")?;
//! engine.create_table(
//!     "users",
//!     &[
//!         Column::new("id", ColumnType::Integer),
//!         Column::new("name", ColumnType::Text),
//!     ],
//! )?;
//! engine.insert_data("users", &["1", "Alice"])?;
//!
//! for row in engine.select(&SelectQuery::new("users").order_by("name"))? {
//!     println!("{}", row);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Value, schema and row encoding
pub mod codec;

/// Whole-file line I/O
pub mod file;

/// Table region location
pub mod locator;

/// Select execution
pub mod query;

/// Transaction slot
pub mod txn;

mod engine;

pub use codec::{Column, ColumnType, Value};
pub use engine::{validate_columns, validate_table_name, StorageEngine};
pub use locator::TableRegion;
pub use query::{ResultSet, Row, SelectQuery};
pub use txn::{TransactionManager, TransactionState};
