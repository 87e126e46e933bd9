//! Bindable column values.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// A typed, nullable value for one column.
///
/// Entities hand these to the repository, which binds each variant as a
/// query parameter of the matching PostgreSQL type.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// `BOOLEAN`.
    Bool(Option<bool>),
    /// `SMALLINT`.
    SmallInt(Option<i16>),
    /// `INTEGER`.
    Int(Option<i32>),
    /// `BIGINT`.
    BigInt(Option<i64>),
    /// `DOUBLE PRECISION`.
    Double(Option<f64>),
    /// `TEXT` / `VARCHAR`.
    Text(Option<String>),
    /// `UUID`.
    Uuid(Option<Uuid>),
    /// `TIMESTAMPTZ`.
    Timestamp(Option<DateTime<Utc>>),
    /// `DATE`.
    Date(Option<NaiveDate>),
    /// `JSONB`.
    Json(Option<serde_json::Value>),
    /// `BYTEA`.
    Bytes(Option<Vec<u8>>),
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        Self::Bool(Some(value))
    }
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        Self::Int(Some(value))
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        Self::BigInt(Some(value))
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        Self::Double(Some(value))
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        Self::Text(Some(value))
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        Self::Text(Some(value.to_string()))
    }
}

impl From<Option<String>> for ColumnValue {
    fn from(value: Option<String>) -> Self {
        Self::Text(value)
    }
}

impl From<Uuid> for ColumnValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(Some(value))
    }
}

impl From<Option<Uuid>> for ColumnValue {
    fn from(value: Option<Uuid>) -> Self {
        Self::Uuid(value)
    }
}

impl From<DateTime<Utc>> for ColumnValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(Some(value))
    }
}

impl From<Option<DateTime<Utc>>> for ColumnValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<serde_json::Value> for ColumnValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(Some(value))
    }
}
