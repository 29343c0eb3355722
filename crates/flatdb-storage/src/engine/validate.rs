//! Input validation run before any mutation.

use std::collections::HashSet;

use flatdb_common::constants::{FIELD_DELIMITER, HEADER_MARKER};
use flatdb_common::{DbError, DbResult};

use crate::codec::{fold_name, validate_column_name, Column};
use crate::locator::header_name;

/// Checks a table name.
///
/// Names are compared case-insensitively, must be non-empty, must not
/// contain `#`, `|` or a line break, and must not carry surrounding
/// whitespace (header lines are trimmed when located).
pub fn validate_table_name(name: &str) -> DbResult<()> {
    let reason = if name.trim().is_empty() {
        "name is empty"
    } else if name.contains(HEADER_MARKER) {
        "name contains '#'"
    } else if name.contains(FIELD_DELIMITER) {
        "name contains '|'"
    } else if name.contains(['\n', '\r']) {
        "name contains a line break"
    } else if name.trim() != name {
        "name has leading or trailing whitespace"
    } else {
        return Ok(());
    };

    Err(DbError::invalid_name(name, reason))
}

/// Checks the column list of a new table.
pub fn validate_columns(columns: &[Column]) -> DbResult<()> {
    if columns.is_empty() {
        return Err(DbError::invalid_columns("a table needs at least one column"));
    }

    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        validate_column_name(&column.name)
            .map_err(|reason| DbError::invalid_columns(format!("'{}': {}", column.name, reason)))?;

        if !seen.insert(fold_name(&column.name)) {
            return Err(DbError::invalid_columns(format!(
                "duplicate column '{}'",
                column.name
            )));
        }
    }
    Ok(())
}

/// Checks that an encoded row will read back as a row.
///
/// A blank line is skipped on read and a line starting with `#` is taken
/// for a table header; both would lose the row.
pub fn validate_row_line(column: &str, line: &str) -> DbResult<()> {
    let reason = if line.trim().is_empty() {
        "row would be stored as a blank line"
    } else if header_name(line).is_some() {
        "row would start with '#'"
    } else {
        return Ok(());
    };

    Err(DbError::InvalidValue {
        column: column.to_string(),
        reason: reason.to_string(),
    })
}
