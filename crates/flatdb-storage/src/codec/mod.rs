//! Row codec and schema parser.
//!
//! This module converts between typed values and the textual fields stored
//! on data lines, and between column definitions and schema lines.
//!
//! # Line Format
//!
//! ```text
//! #users                              <- header line
//! id:Integer|name:Text|active:Boolean <- schema line
//!                                     <- blank line (not load-bearing)
//! 1|Alice|true                        <- data line
//! ```
//!
//! There is no escaping: neither `|` nor a line break may appear inside a
//! field, and both are rejected before anything is written.

mod row;
mod schema;
mod types;

pub use row::{decode_value, encode_value, join_row, split_row, validate_field};
pub use schema::{format_schema, parse_schema, validate_column_name};
pub use types::{Column, ColumnType, Value};

/// Lowercases a name one character at a time.
///
/// Unlike `str::to_lowercase` this ignores context (a final `Σ` folds to
/// `σ`, not `ς`), so two names fold equal exactly when `names_eq` holds.
pub fn fold_name(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}

/// Compares two names case-insensitively.
///
/// Table and column names are matched this way everywhere.
pub fn names_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
