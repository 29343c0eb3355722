//! Error handling for FlatDB.
//!
//! This module provides a unified error type and result alias used
//! across all FlatDB components.

mod database;

pub use database::{DbError, ErrorCode, ErrorKind};

/// Result type alias for FlatDB operations.
pub type DbResult<T> = std::result::Result<T, DbError>;
