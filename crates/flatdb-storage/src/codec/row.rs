//! Field encoding and row splitting.

use flatdb_common::constants::FIELD_DELIMITER;
use flatdb_common::{DbError, DbResult};

use super::types::{ColumnType, Value};

/// Rejects fields that would break the line format.
pub fn validate_field(column: &str, text: &str) -> DbResult<()> {
    let reason = if text.contains(FIELD_DELIMITER) {
        "value contains '|'"
    } else if text.contains(['\n', '\r']) {
        "value contains a line break"
    } else {
        return Ok(());
    };

    Err(DbError::InvalidValue {
        column: column.to_string(),
        reason: reason.to_string(),
    })
}

/// Parses `text` as a value of type `ty`.
///
/// Integers and booleans are trimmed before parsing; booleans are matched
/// case-insensitively.
pub fn decode_value(ty: ColumnType, text: &str) -> DbResult<Value> {
    let mismatch = || DbError::TypeMismatch {
        expected: ty.to_string(),
        value: text.to_string(),
    };

    match ty {
        ColumnType::Integer => text
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| mismatch()),
        ColumnType::Boolean => {
            let trimmed = text.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(Value::Boolean(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(Value::Boolean(false))
            } else {
                Err(mismatch())
            }
        }
        ColumnType::Text => Ok(Value::Text(text.to_string())),
    }
}

/// Returns the canonical stored form of `text` for type `ty`.
///
/// `"007"` becomes `"7"` for an integer column and `"TRUE"` becomes
/// `"true"` for a boolean column; text passes through unchanged.
pub fn encode_value(ty: ColumnType, text: &str) -> DbResult<String> {
    decode_value(ty, text).map(|value| value.to_string())
}

/// Splits a data line into its fields.
pub fn split_row(line: &str) -> Vec<&str> {
    line.split(FIELD_DELIMITER).collect()
}

/// Joins fields into a data line.
pub fn join_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(FIELD_DELIMITER);
        }
        line.push_str(field.as_ref());
    }
    line
}
