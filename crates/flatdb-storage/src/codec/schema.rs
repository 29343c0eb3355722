//! Schema line parsing and formatting.

use flatdb_common::constants::{FIELD_DELIMITER, HEADER_MARKER, TYPE_SEPARATOR};
use flatdb_common::{DbError, DbResult};

use super::types::{Column, ColumnType};

/// Checks a column name, returning the violated rule on failure.
///
/// A valid name reads back unchanged from the schema line: the line is
/// trimmed on read and a leading `#` marks a table header.
pub fn validate_column_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("column name is empty");
    }
    if name.trim() != name {
        return Err("column name has leading or trailing whitespace");
    }
    if name.starts_with(HEADER_MARKER) {
        return Err("column name starts with '#'");
    }
    if name.contains(FIELD_DELIMITER) {
        return Err("column name contains '|'");
    }
    if name.contains(TYPE_SEPARATOR) {
        return Err("column name contains ':'");
    }
    if name.contains(['\n', '\r']) {
        return Err("column name contains a line break");
    }
    Ok(())
}

/// Parses a schema line such as `id:Integer|name:Text`.
///
/// # Errors
///
/// - `MalformedSchema` if a token does not split into exactly `name:type`
/// - `InvalidColumnName` if a name is empty
/// - `UnknownColumnType` if a type token is not recognized
pub fn parse_schema(line: &str) -> DbResult<Vec<Column>> {
    line.trim()
        .split(FIELD_DELIMITER)
        .map(|token| {
            let parts: Vec<&str> = token.split(TYPE_SEPARATOR).collect();
            let [name, type_token] = parts.as_slice() else {
                return Err(DbError::MalformedSchema {
                    token: token.to_string(),
                });
            };

            if validate_column_name(name).is_err() {
                return Err(DbError::InvalidColumnName {
                    name: (*name).to_string(),
                });
            }

            Ok(Column::new(*name, ColumnType::parse(type_token)?))
        })
        .collect()
}

/// Formats columns as a schema line.
pub fn format_schema(columns: &[Column]) -> String {
    columns
        .iter()
        .map(Column::to_string)
        .collect::<Vec<_>>()
        .join(&FIELD_DELIMITER.to_string())
}
