//! Projection, filter and sort over a table region.

use flatdb_common::{DbError, DbResult};
use tracing::debug;

use crate::codec::{names_eq, split_row, Column};
use crate::locator::{line_at, read_schema, TableRegion};

use super::result::{ResultSet, Row};
use super::select::SelectQuery;

/// Maps requested column names to schema positions.
///
/// With no request every column is returned in schema order. A requested
/// name that matches no column maps to `None`, which yields an absent value
/// in that output position.
pub fn project(columns: &[Column], requested: Option<&[String]>) -> Vec<Option<usize>> {
    match requested {
        None => (0..columns.len()).map(Some).collect(),
        Some(names) => names
            .iter()
            .map(|name| columns.iter().position(|c| names_eq(&c.name, name)))
            .collect(),
    }
}

/// Resolves the order-by column against the full (unprojected) schema.
///
/// # Errors
///
/// `InvalidOrderColumn` if no column matches `name`.
pub fn resolve_order_column(table: &str, columns: &[Column], name: &str) -> DbResult<usize> {
    columns
        .iter()
        .position(|c| names_eq(&c.name, name))
        .ok_or_else(|| DbError::InvalidOrderColumn {
            table: table.to_string(),
            column: name.to_string(),
        })
}

/// Yields the split fields of each non-blank data line in `region`.
fn scan_rows<'l, S: AsRef<str>>(
    lines: &'l [S],
    region: TableRegion,
    table: &'l str,
    width: usize,
) -> impl Iterator<Item = DbResult<Vec<&'l str>>> + 'l {
    region.data_lines().filter_map(move |index| {
        let line = match line_at(lines, index) {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        if line.trim().is_empty() {
            return None;
        }

        let fields = split_row(line);
        if fields.len() != width {
            return Some(Err(DbError::MalformedRow {
                table: table.to_string(),
                line: index,
                expected: width,
                actual: fields.len(),
            }));
        }
        Some(Ok(fields))
    })
}

/// Runs `query` against the table occupying `region` of `lines`.
pub fn execute<S: AsRef<str>>(
    lines: &[S],
    region: TableRegion,
    query: &SelectQuery<'_>,
) -> DbResult<ResultSet> {
    let table = query.table();
    let columns = read_schema(lines, region)?;

    let projection = project(&columns, query.requested_columns());
    let order_index = query
        .order_column()
        .map(|name| resolve_order_column(table, &columns, name))
        .transpose()?;

    let mut scanned = 0usize;
    let mut rows: Vec<(Option<String>, Row)> = Vec::new();
    for fields in scan_rows(lines, region, table, columns.len()) {
        let fields = fields?;
        scanned += 1;

        let row = Row::new(
            projection
                .iter()
                .map(|slot| slot.map(|i| fields[i].to_string()))
                .collect(),
        );
        if !query.matches(&row) {
            continue;
        }

        let key = order_index.map(|i| fields[i].to_string());
        rows.push((key, row));
    }

    // Stable: ties keep their file order.
    if order_index.is_some() {
        rows.sort_by(|a, b| a.0.cmp(&b.0));
    }

    let names = match query.requested_columns() {
        Some(requested) => requested.to_vec(),
        None => columns.into_iter().map(|c| c.name).collect(),
    };

    debug!(table = %table, scanned = scanned, returned = rows.len(), "select executed");
    Ok(ResultSet::new(
        names,
        rows.into_iter().map(|(_, row)| row).collect(),
    ))
}
