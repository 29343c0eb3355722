//! Database error types.
//!
//! Every failure the engine can report is a distinct `DbError` variant so
//! callers can match on it programmatically.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for categorizing errors.
///
/// These codes can be used for programmatic error handling and
/// are stable across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Validation errors (0x0100 - 0x01FF)
    /// Table name violates the naming rules.
    InvalidName = 0x0100,
    /// Column list violates the naming rules.
    InvalidColumns = 0x0101,
    /// A table with the same name already exists.
    TableAlreadyExists = 0x0102,
    /// Row field count differs from column count.
    ArityMismatch = 0x0103,
    /// Field contains a reserved character.
    InvalidValue = 0x0104,
    /// Field does not parse as its column type.
    TypeMismatch = 0x0105,
    /// Order-by column is not part of the table.
    InvalidOrderColumn = 0x0106,

    // State errors (0x0200 - 0x02FF)
    /// A transaction is already open.
    TransactionAlreadyOpen = 0x0200,
    /// No transaction is open.
    NoActiveTransaction = 0x0201,
    /// Operation is not allowed while a transaction is open.
    TransactionActive = 0x0202,
    /// Table not found.
    TableNotFound = 0x0203,
    /// Backing store file not found.
    StoreNotFound = 0x0204,

    // Parse errors (0x0300 - 0x03FF)
    /// Schema line is malformed.
    MalformedSchema = 0x0300,
    /// Stored column name is invalid.
    InvalidColumnName = 0x0301,
    /// Stored column type is unknown.
    UnknownColumnType = 0x0302,
    /// Line index beyond the end of the file.
    LineOutOfRange = 0x0303,
    /// Data line does not match its schema.
    MalformedRow = 0x0304,

    // I/O errors (0x0400 - 0x04FF)
    /// General I/O error.
    Io = 0x0400,
    /// Configuration could not be loaded or saved.
    InvalidConfig = 0x0401,
}

impl ErrorCode {
    /// Returns the numeric code.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns the error kind this code belongs to.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match (self as u16) >> 8 {
            0x01 => ErrorKind::Validation,
            0x02 => ErrorKind::State,
            0x03 => ErrorKind::Parse,
            _ => ErrorKind::Io,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Broad classes of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller supplied bad input; detected before any mutation.
    Validation,
    /// Operation called in the wrong state (transaction, missing table).
    State,
    /// On-disk content is corrupt or was edited by hand.
    Parse,
    /// Filesystem or configuration failure.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "Validation"),
            ErrorKind::State => write!(f, "State"),
            ErrorKind::Parse => write!(f, "Parse"),
            ErrorKind::Io => write!(f, "I/O"),
        }
    }
}

/// The main error type for FlatDB.
///
/// # Example
///
/// ```rust
/// use flatdb_common::error::{DbError, DbResult, ErrorKind};
///
/// fn find(table: &str) -> DbResult<()> {
///     Err(DbError::TableNotFound { table: table.to_string() })
/// }
///
/// let err = find("users").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::State);
/// ```
#[derive(Debug, Error)]
pub enum DbError {
    // ==========================================================================
    // Validation Errors
    // ==========================================================================
    /// Table name violates the naming rules.
    #[error("invalid table name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Which rule was violated.
        reason: String,
    },

    /// Column definitions violate the naming rules.
    #[error("invalid columns: {reason}")]
    InvalidColumns {
        /// Which rule was violated.
        reason: String,
    },

    /// A table with the same (case-insensitive) name already exists.
    #[error("table '{table}' already exists")]
    TableAlreadyExists {
        /// The conflicting table.
        table: String,
    },

    /// Row field count differs from the table's column count.
    #[error("table '{table}' has {expected} columns, got {actual} values")]
    ArityMismatch {
        /// The target table.
        table: String,
        /// Column count.
        expected: usize,
        /// Supplied value count.
        actual: usize,
    },

    /// Field contains the field delimiter or a line break.
    #[error("invalid value for column '{column}': {reason}")]
    InvalidValue {
        /// The column the value was meant for.
        column: String,
        /// Which rule was violated.
        reason: String,
    },

    /// Field does not parse as its column type.
    #[error("type mismatch: expected {expected}, got '{value}'")]
    TypeMismatch {
        /// Expected column type.
        expected: String,
        /// The offending text.
        value: String,
    },

    /// Order-by column does not exist in the table.
    #[error("cannot order by '{column}': not a column of table '{table}'")]
    InvalidOrderColumn {
        /// The queried table.
        table: String,
        /// The unresolved column.
        column: String,
    },

    // ==========================================================================
    // State Errors
    // ==========================================================================
    /// `begin` called while a transaction is already open.
    #[error("a transaction is already open")]
    TransactionAlreadyOpen,

    /// `commit` or `rollback` called with no open transaction.
    #[error("no active transaction")]
    NoActiveTransaction,

    /// Operation refused while a transaction is open.
    #[error("cannot {operation} while a transaction is open")]
    TransactionActive {
        /// The refused operation.
        operation: &'static str,
    },

    /// Table not found.
    #[error("table '{table}' not found")]
    TableNotFound {
        /// The missing table.
        table: String,
    },

    /// Backing store file does not exist.
    #[error("store file not found: {}", path.display())]
    StoreNotFound {
        /// The missing file.
        path: PathBuf,
    },

    // ==========================================================================
    // Parse Errors
    // ==========================================================================
    /// Schema line token does not split into `name:type`.
    #[error("malformed schema token '{token}'")]
    MalformedSchema {
        /// The offending token.
        token: String,
    },

    /// Stored column name is empty or contains a delimiter.
    #[error("invalid column name '{name}'")]
    InvalidColumnName {
        /// The offending name.
        name: String,
    },

    /// Stored column type is not one of the known types.
    #[error("unknown column type '{token}'")]
    UnknownColumnType {
        /// The offending type token.
        token: String,
    },

    /// A line index points past the end of the file.
    #[error("line {line} out of range (file has {line_count} lines)")]
    LineOutOfRange {
        /// Requested line index.
        line: usize,
        /// Number of lines in the file.
        line_count: usize,
    },

    /// A data line's field count differs from its schema.
    #[error("malformed row at line {line} of table '{table}': expected {expected} fields, got {actual}")]
    MalformedRow {
        /// The table being read.
        table: String,
        /// Line index in the file.
        line: usize,
        /// Column count.
        expected: usize,
        /// Field count found.
        actual: usize,
    },

    // ==========================================================================
    // I/O Errors
    // ==========================================================================
    /// I/O error from the underlying system.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or saved.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Error message.
        message: String,
    },
}

impl DbError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidName { .. } => ErrorCode::InvalidName,
            Self::InvalidColumns { .. } => ErrorCode::InvalidColumns,
            Self::TableAlreadyExists { .. } => ErrorCode::TableAlreadyExists,
            Self::ArityMismatch { .. } => ErrorCode::ArityMismatch,
            Self::InvalidValue { .. } => ErrorCode::InvalidValue,
            Self::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            Self::InvalidOrderColumn { .. } => ErrorCode::InvalidOrderColumn,
            Self::TransactionAlreadyOpen => ErrorCode::TransactionAlreadyOpen,
            Self::NoActiveTransaction => ErrorCode::NoActiveTransaction,
            Self::TransactionActive { .. } => ErrorCode::TransactionActive,
            Self::TableNotFound { .. } => ErrorCode::TableNotFound,
            Self::StoreNotFound { .. } => ErrorCode::StoreNotFound,
            Self::MalformedSchema { .. } => ErrorCode::MalformedSchema,
            Self::InvalidColumnName { .. } => ErrorCode::InvalidColumnName,
            Self::UnknownColumnType { .. } => ErrorCode::UnknownColumnType,
            Self::LineOutOfRange { .. } => ErrorCode::LineOutOfRange,
            Self::MalformedRow { .. } => ErrorCode::MalformedRow,
            Self::Io { .. } => ErrorCode::Io,
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
        }
    }

    /// Returns the broad class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// Returns true if the caller supplied bad input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation)
    }

    /// Returns true if the backing file looks corrupt.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self.kind(), ErrorKind::Parse)
    }

    /// Creates a table-not-found error.
    #[must_use]
    pub fn table_not_found(table: impl Into<String>) -> Self {
        Self::TableNotFound {
            table: table.into(),
        }
    }

    /// Creates an invalid table name error.
    #[must_use]
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid columns error.
    #[must_use]
    pub fn invalid_columns(reason: impl Into<String>) -> Self {
        Self::InvalidColumns {
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
