//! Table region location.
//!
//! A database file has no index: a table is found by scanning every line
//! for its header. The region runs from the header to the next header line
//! (or EOF). Every operation rescans from the top, so the cost is linear in
//! the file size.

use std::ops::Range;

use flatdb_common::constants::{DATA_LINE_OFFSET, HEADER_MARKER, SCHEMA_LINE_OFFSET};
use flatdb_common::{DbError, DbResult};

use crate::codec::{names_eq, parse_schema, Column};

/// Line span `[start, end)` occupied by one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRegion {
    /// Index of the header line.
    pub start: usize,
    /// Index of the next header line, or the line count.
    pub end: usize,
}

impl TableRegion {
    /// Index of the schema line.
    pub const fn schema_line(&self) -> usize {
        self.start + SCHEMA_LINE_OFFSET
    }

    /// Indices of the lines that may hold rows (blank lines included).
    pub fn data_lines(&self) -> Range<usize> {
        (self.start + DATA_LINE_OFFSET).min(self.end)..self.end
    }

    /// Returns the whole region as a range.
    pub const fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of lines in the region.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the region is empty (never the case for a located table).
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Returns the table name a line declares, if it is a header line.
pub fn header_name(line: &str) -> Option<&str> {
    line.trim().strip_prefix(HEADER_MARKER)
}

/// Finds the region of `table`.
///
/// # Errors
///
/// `TableNotFound` when no header matches `table` case-insensitively.
pub fn locate<S: AsRef<str>>(lines: &[S], table: &str) -> DbResult<TableRegion> {
    let start = lines
        .iter()
        .position(|line| header_name(line.as_ref()).is_some_and(|name| names_eq(name, table)))
        .ok_or_else(|| DbError::table_not_found(table))?;

    let end = lines[start + 1..]
        .iter()
        .position(|line| header_name(line.as_ref()).is_some())
        .map_or(lines.len(), |offset| start + 1 + offset);

    Ok(TableRegion { start, end })
}

/// Returns the names of every table in file order.
pub fn table_names<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| header_name(line.as_ref()))
        .map(str::to_owned)
        .collect()
}

/// Returns the line at `index`.
///
/// # Errors
///
/// `LineOutOfRange` when `index` is past the end of `lines`.
pub fn line_at<S: AsRef<str>>(lines: &[S], index: usize) -> DbResult<&str> {
    lines
        .get(index)
        .map(|line| line.as_ref())
        .ok_or(DbError::LineOutOfRange {
            line: index,
            line_count: lines.len(),
        })
}

/// Parses the schema line of `region`.
///
/// # Errors
///
/// `LineOutOfRange` when the region has no schema line, or any error from
/// [`parse_schema`].
pub fn read_schema<S: AsRef<str>>(lines: &[S], region: TableRegion) -> DbResult<Vec<Column>> {
    let index = region.schema_line();
    if index >= region.end {
        return Err(DbError::LineOutOfRange {
            line: index,
            line_count: lines.len(),
        });
    }
    parse_schema(line_at(lines, index)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<&'static str> {
        vec![
            "#users",
            "id:Integer|name:Text",
            "",
            "1|Alice",
            "  #Orders  ",
            "id:Integer",
            "7",
            "#empty",
        ]
    }

    #[test]
    fn test_locate_first_table() {
        let region = locate(&sample(), "users").unwrap();
        assert_eq!(region, TableRegion { start: 0, end: 4 });
        assert_eq!(region.schema_line(), 1);
        assert_eq!(region.data_lines(), 2..4);
    }

    #[test]
    fn test_locate_is_case_insensitive_and_trims() {
        let region = locate(&sample(), "ORDERS").unwrap();
        assert_eq!(region, TableRegion { start: 4, end: 7 });
    }

    #[test]
    fn test_locate_last_table_runs_to_eof() {
        let region = locate(&sample(), "empty").unwrap();
        assert_eq!(region, TableRegion { start: 7, end: 8 });
        assert!(region.data_lines().is_empty());
        assert_eq!(region.len(), 1);
    }

    #[test]
    fn test_locate_missing() {
        let err = locate(&sample(), "user").unwrap_err();
        assert!(matches!(err, DbError::TableNotFound { table } if table == "user"));

        let empty: Vec<String> = Vec::new();
        assert!(locate(&empty, "users").is_err());
    }

    #[test]
    fn test_header_name() {
        assert_eq!(header_name("#users"), Some("users"));
        assert_eq!(header_name("  #users "), Some("users"));
        assert_eq!(header_name("users"), None);
        assert_eq!(header_name("1|#x"), None);
    }

    #[test]
    fn test_table_names() {
        assert_eq!(table_names(&sample()), vec!["users", "Orders", "empty"]);
    }

    #[test]
    fn test_read_schema() {
        let lines = sample();
        let columns = read_schema(&lines, locate(&lines, "users").unwrap()).unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[1].name, "name");

        // "#empty" is the last line: no schema follows it.
        let region = locate(&lines, "empty").unwrap();
        assert!(matches!(
            read_schema(&lines, region),
            Err(DbError::LineOutOfRange { line: 8, .. })
        ));
    }

    #[test]
    fn test_line_at() {
        let lines = sample();
        assert_eq!(line_at(&lines, 1).unwrap(), "id:Integer|name:Text");
        assert!(matches!(
            line_at(&lines, 8),
            Err(DbError::LineOutOfRange { line: 8, line_count: 8 })
        ));
    }
}
