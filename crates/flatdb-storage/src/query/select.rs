//! Select query description.

use std::fmt;

use super::result::Row;

/// Predicate evaluated against each projected row.
pub type RowPredicate<'a> = Box<dyn Fn(&Row) -> bool + 'a>;

/// A select over one table.
///
/// # Example
///
/// ```rust
/// use flatdb_storage::query::SelectQuery;
///
/// let query = SelectQuery::new("users")
///     .columns(["id", "name"])
///     .filter(|row| row.get(1) != Some("Bob"))
///     .order_by("name");
/// assert_eq!(query.table(), "users");
/// ```
pub struct SelectQuery<'a> {
    /// Table to read.
    table: String,
    /// Requested columns; `None` means all, in schema order.
    columns: Option<Vec<String>>,
    /// Row predicate; `None` passes every row.
    filter: Option<RowPredicate<'a>>,
    /// Column to order by.
    order_by: Option<String>,
}

impl<'a> SelectQuery<'a> {
    /// Selects every column of every row of `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            filter: None,
            order_by: None,
        }
    }

    /// Restricts the output to the named columns, in the given order.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Keeps only rows for which `predicate` returns true.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Row) -> bool + 'a,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Orders rows ascending by the stored text of `column`.
    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self
    }

    /// Returns the table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the requested columns, if any.
    pub fn requested_columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// Returns the order-by column, if any.
    pub fn order_column(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    /// Evaluates the predicate; true when there is none.
    pub fn matches(&self, row: &Row) -> bool {
        self.filter.as_ref().map_or(true, |predicate| predicate(row))
    }
}

impl fmt::Debug for SelectQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectQuery")
            .field("table", &self.table)
            .field("columns", &self.columns)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .field("order_by", &self.order_by)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = SelectQuery::new("t");
        assert_eq!(query.table(), "t");
        assert!(query.requested_columns().is_none());
        assert!(query.order_column().is_none());
        assert!(query.matches(&Row::default()));
    }

    #[test]
    fn test_builder() {
        let wanted = "x".to_string();
        let query = SelectQuery::new("t")
            .columns(vec!["a".to_string(), "b".to_string()])
            .filter(|row| row.get(0) == Some(wanted.as_str()))
            .order_by("b");

        assert_eq!(
            query.requested_columns(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
        assert_eq!(query.order_column(), Some("b"));
        assert!(query.matches(&Row::from_fields(["x", "y"])));
        assert!(!query.matches(&Row::from_fields(["y", "x"])));
        assert!(format!("{:?}", query).contains("<fn>"));
    }
}
