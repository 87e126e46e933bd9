//! Filter types for dynamic query building.
//!
//! A [`Filter`] is the predicate passed to repository reads: a conjunction
//! of column conditions plus optional ordering. Repositories compile it to
//! parameterized SQL, so values are always bound and only column names are
//! spliced into the statement text. Column names are therefore checked by
//! [`Filter::validate`] before use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::sorting::SortField;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// SQL `LIKE` pattern match.
    Like,
    /// SQL `ILIKE` case-insensitive pattern match.
    ILike,
    /// SQL `= ANY(...)` list membership.
    In,
    /// SQL `IS NULL` check.
    IsNull,
    /// SQL `IS NOT NULL` check.
    IsNotNull,
}

impl FilterOp {
    /// SQL operator text for binary comparisons.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::ILike => "ILIKE",
            Self::In => "= ANY",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }

    /// Whether the operator takes no right-hand value.
    pub fn is_unary(&self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

/// A dynamic filter value that can represent various SQL types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A UUID value.
    Uuid(Uuid),
    /// A timestamp value.
    Timestamp(DateTime<Utc>),
    /// A string value.
    String(String),
    /// A list of UUID values (for `IN`).
    UuidList(Vec<Uuid>),
    /// A list of string values (for `IN`).
    StringList(Vec<String>),
    /// Null / no value (for `IS NULL`, `IS NOT NULL`).
    Null,
}

/// A single filter condition on a named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Eq, value.into())
    }

    /// Shorthand for a case-insensitive LIKE filter.
    pub fn ilike(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOp::ILike, FilterValue::String(pattern.into()))
    }

    /// Shorthand for list membership.
    pub fn is_in(field: impl Into<String>, values: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::In, values.into())
    }

    /// Shorthand for `IS NULL`.
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOp::IsNull, FilterValue::Null)
    }

    fn validate(&self) -> AppResult<()> {
        ensure_identifier(&self.field)?;
        let list_value = matches!(
            self.value,
            FilterValue::UuidList(_) | FilterValue::StringList(_)
        );
        match self.op {
            FilterOp::In if !list_value => Err(AppError::validation(format!(
                "Filter on '{}' uses IN without a list value",
                self.field
            ))),
            op if !matches!(op, FilterOp::In) && list_value => Err(AppError::validation(format!(
                "Filter on '{}' uses a list value without IN",
                self.field
            ))),
            op if !op.is_unary() && self.value == FilterValue::Null => {
                Err(AppError::validation(format!(
                    "Filter on '{}' compares against null; use IS NULL",
                    self.field
                )))
            }
            _ => Ok(()),
        }
    }
}

/// A conjunction of conditions with optional ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Conditions joined with `AND`.
    #[serde(default)]
    pub fields: Vec<FilterField>,
    /// Ordering applied to list queries.
    #[serde(default)]
    pub order_by: Vec<SortField>,
}

impl Filter {
    /// A filter matching every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition.
    pub fn and(mut self, field: FilterField) -> Self {
        self.fields.push(field);
        self
    }

    /// Add an ordering column.
    pub fn order(mut self, sort: SortField) -> Self {
        self.order_by.push(sort);
        self
    }

    /// Whether the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check column names and operator/value pairings.
    pub fn validate(&self) -> AppResult<()> {
        for field in &self.fields {
            field.validate()?;
        }
        for sort in &self.order_by {
            ensure_identifier(&sort.field)?;
        }
        Ok(())
    }
}

/// Reject anything that is not a plain lower-case SQL identifier.
pub fn ensure_identifier(name: &str) -> AppResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first == '_' || first.is_ascii_lowercase() => {
            chars.all(|c| c == '_' || c.is_ascii_lowercase() || c.is_ascii_digit())
        }
        _ => false,
    };
    if valid && name.len() <= 63 {
        Ok(())
    } else {
        Err(AppError::validation(format!("Invalid column name '{name}'")))
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Vec<Uuid>> for FilterValue {
    fn from(value: Vec<Uuid>) -> Self {
        Self::UuidList(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringList(value)
    }
}
