//! Column types, column definitions and typed values.

use std::fmt;
use std::str::FromStr;

use flatdb_common::{DbError, DbResult};

/// The closed set of column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 64-bit signed integer.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// Free text without delimiters or line breaks.
    Text,
}

/// Accepted type tokens, matched case-insensitively.
const TYPE_TOKENS: &[(&str, ColumnType)] = &[
    ("integer", ColumnType::Integer),
    ("int", ColumnType::Integer),
    ("boolean", ColumnType::Boolean),
    ("bool", ColumnType::Boolean),
    ("text", ColumnType::Text),
    ("string", ColumnType::Text),
];

impl ColumnType {
    /// Parses a type token such as `Integer`, `bool` or `STRING`.
    pub fn parse(token: &str) -> DbResult<Self> {
        let trimmed = token.trim();
        TYPE_TOKENS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|&(_, ty)| ty)
            .ok_or_else(|| DbError::UnknownColumnType {
                token: token.to_string(),
            })
    }

    /// Returns the token written to schema lines.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "Integer",
            ColumnType::Boolean => "Boolean",
            ColumnType::Text => "Text",
        }
    }
}

impl FromStr for ColumnType {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Column type.
    pub column_type: ColumnType,
}

impl Column {
    /// Creates a new column.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// Creates a column from a name and a type token.
    pub fn parse(name: impl Into<String>, type_token: &str) -> DbResult<Self> {
        Ok(Self::new(name, ColumnType::parse(type_token)?))
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.column_type)
    }
}

/// A typed view of a stored field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Integer value.
    Integer(i64),
    /// Boolean value.
    Boolean(bool),
    /// Text value.
    Text(String),
}

impl Value {
    /// Returns the type of this value.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Integer(_) => ColumnType::Integer,
            Value::Boolean(_) => ColumnType::Boolean,
            Value::Text(_) => ColumnType::Text,
        }
    }

    /// Returns the integer, if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// Formats the canonical stored form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}
