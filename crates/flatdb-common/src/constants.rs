//! Format constants for FlatDB.
//!
//! These values define the line-oriented on-disk layout. Changing any of
//! them makes existing database files unreadable.

// =============================================================================
// Line Format
// =============================================================================

/// Prefix that marks a table header line (`#<TableName>`).
pub const HEADER_MARKER: char = '#';

/// Separator between columns on a schema line and between fields on a row.
pub const FIELD_DELIMITER: char = '|';

/// Separator between a column's name and its type on a schema line.
pub const TYPE_SEPARATOR: char = ':';

/// Line terminator used when rewriting a database file.
pub const LINE_TERMINATOR: &str = "\n";

/// Offset of the schema line from its table's header line.
pub const SCHEMA_LINE_OFFSET: usize = 1;

/// Offset of the first data line from its table's header line.
pub const DATA_LINE_OFFSET: usize = 2;

// =============================================================================
// Files
// =============================================================================

/// Default database file name.
pub const DEFAULT_DATA_FILE: &str = "flatdb.txt";

/// Extension appended to the data file path to form the snapshot path.
pub const SNAPSHOT_EXTENSION: &str = "txn";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiters_are_distinct() {
        assert_ne!(HEADER_MARKER, FIELD_DELIMITER);
        assert_ne!(FIELD_DELIMITER, TYPE_SEPARATOR);
        assert_ne!(HEADER_MARKER, TYPE_SEPARATOR);
    }

    #[test]
    fn test_line_offsets() {
        assert!(DATA_LINE_OFFSET > SCHEMA_LINE_OFFSET);
    }
}
