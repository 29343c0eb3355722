//! Result rows and result sets.

use std::fmt;

use flatdb_common::DbResult;

use crate::codec::{decode_value, ColumnType, Value};

/// A projected result row.
///
/// Each position holds the stored text of a field, or `None` when the
/// requested column does not exist in the table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Row {
    /// The values in this row.
    values: Vec<Option<String>>,
}

impl Row {
    /// Creates a new row with the given values.
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Creates a row where every value is present.
    pub fn from_fields<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            values: fields.into_iter().map(|f| Some(f.into())).collect(),
        }
    }

    /// Returns the number of values in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the text at `index`, or `None` if absent or out of bounds.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(Option::as_deref)
    }

    /// Parses the text at `index` as a value of type `ty`.
    pub fn get_typed(&self, index: usize, ty: ColumnType) -> Option<DbResult<Value>> {
        self.get(index).map(|text| decode_value(ty, text))
    }

    /// Returns the values as a slice.
    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    /// Consumes the row and returns its values.
    pub fn into_values(self) -> Vec<Option<String>> {
        self.values
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.values.iter().map(Option::as_deref)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Some(v) => write!(f, "{}", v)?,
                None => write!(f, "NULL")?,
            }
        }
        write!(f, ")")
    }
}

/// The rows returned by a select.
///
/// A `ResultSet` is an owning iterator: it can be consumed once and is not
/// affected by writes made after it was produced.
#[derive(Debug)]
pub struct ResultSet {
    /// Output column names, in output order.
    columns: Vec<String>,
    /// Remaining rows.
    rows: std::vec::IntoIter<Row>,
}

impl ResultSet {
    /// Creates a result set.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows: rows.into_iter(),
        }
    }

    /// Returns the output column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Collects the remaining rows as plain strings, absent values as `None`.
    pub fn into_values(self) -> Vec<Vec<Option<String>>> {
        self.rows.map(Row::into_values).collect()
    }
}

impl Iterator for ResultSet {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for ResultSet {}
