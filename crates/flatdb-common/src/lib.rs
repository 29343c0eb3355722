//! # flatdb-common
//!
//! Common types, errors, and configuration for FlatDB.
//!
//! This crate provides the foundations shared by all FlatDB components:
//!
//! - **Errors**: Unified error handling with `DbError`, grouped by `ErrorKind`
//! - **Config**: `StoreConfig` for locating the backing file and snapshot
//! - **Constants**: Line-format markers and delimiters
//!
//! ## Example
//!
//! ```rust
//! use flatdb_common::config::StoreConfig;
//! use flatdb_common::error::DbResult;
//!
//! fn example() -> DbResult<()> {
//!     let config = StoreConfig::builder().data_file("app.txt").build();
//!     assert!(config.create_if_missing);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod constants;
pub mod error;

// Re-export commonly used items at the crate root
pub use config::StoreConfig;
pub use constants::*;
pub use error::{DbError, DbResult, ErrorCode, ErrorKind};
