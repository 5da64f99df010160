use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{DbHandlerError, RowDecodeError};

pub type DbHandlerType = Arc<dyn DbHandler + Send + Sync>;

/// Capability to run parameterized statements against a relational store.
///
/// Repositories hold a shared reference to a handler and never own the
/// underlying connection. Pooling, timeouts and cancellation are the
/// handler's concern.
#[async_trait::async_trait]
pub trait DbHandler {
    async fn query(
        &self,
        statement: &Statement,
    ) -> Result<Vec<Row>, DbHandlerError>;
}

/// A typed, nullable SQL value used both for parameters and result columns.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    BigInt(Option<i64>),
    Text(Option<String>),
    Timestamp(Option<DateTime<Utc>>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            SqlValue::BigInt(None)
                | SqlValue::Text(None)
                | SqlValue::Timestamp(None)
        )
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::BigInt(Some(value))
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(Some(value.to_owned()))
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(Some(value))
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(Some(value))
    }
}

impl From<Option<DateTime<Utc>>> for SqlValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        SqlValue::Timestamp(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Appends the next positional parameter (`$1`, `$2`, ...).
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}

/// One result row: column names paired with their values, in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(column.to_owned(), value.into());
        self
    }

    pub fn push(&mut self, column: String, value: SqlValue) {
        self.columns.push((column, value));
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, column: &str) -> Result<&SqlValue, RowDecodeError> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
            .ok_or_else(|| RowDecodeError::MissingColumn(column.to_owned()))
    }

    pub fn try_get_optional_i64(
        &self,
        column: &str,
    ) -> Result<Option<i64>, RowDecodeError> {
        match self.get(column)? {
            SqlValue::BigInt(value) => Ok(*value),
            _ => Err(type_mismatch(column, "bigint")),
        }
    }

    pub fn try_get_i64(&self, column: &str) -> Result<i64, RowDecodeError> {
        self.try_get_optional_i64(column)?
            .ok_or_else(|| RowDecodeError::UnexpectedNull(column.to_owned()))
    }

    pub fn try_get_optional_string(
        &self,
        column: &str,
    ) -> Result<Option<String>, RowDecodeError> {
        match self.get(column)? {
            SqlValue::Text(value) => Ok(value.clone()),
            _ => Err(type_mismatch(column, "text")),
        }
    }

    pub fn try_get_string(
        &self,
        column: &str,
    ) -> Result<String, RowDecodeError> {
        self.try_get_optional_string(column)?
            .ok_or_else(|| RowDecodeError::UnexpectedNull(column.to_owned()))
    }

    pub fn try_get_optional_timestamp(
        &self,
        column: &str,
    ) -> Result<Option<DateTime<Utc>>, RowDecodeError> {
        match self.get(column)? {
            SqlValue::Timestamp(value) => Ok(*value),
            _ => Err(type_mismatch(column, "timestamptz")),
        }
    }

    pub fn try_get_timestamp(
        &self,
        column: &str,
    ) -> Result<DateTime<Utc>, RowDecodeError> {
        self.try_get_optional_timestamp(column)?
            .ok_or_else(|| RowDecodeError::UnexpectedNull(column.to_owned()))
    }
}

fn type_mismatch(column: &str, expected: &'static str) -> RowDecodeError {
    RowDecodeError::TypeMismatch {
        column: column.to_owned(),
        expected,
    }
}
