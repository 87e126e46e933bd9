//! Base entity model shared by every table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::column::ColumnValue;

/// Column names owned by [`EntityBase`], in insertion order.
pub const BASE_COLUMNS: [&str; 4] = ["id", "create_date_time", "modify_date_time", "is_active"];

/// Identifier, timestamps and the soft-delete flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EntityBase {
    /// Primary key.
    pub id: Uuid,
    /// When the row was first stored.
    pub create_date_time: DateTime<Utc>,
    /// When the row was last changed, if ever.
    pub modify_date_time: Option<DateTime<Utc>>,
    /// `false` once the row has been soft-deleted.
    pub is_active: bool,
}

impl EntityBase {
    /// A fresh, active base with a random id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            create_date_time: Utc::now(),
            modify_date_time: None,
            is_active: true,
        }
    }

    /// Reset the base for a first insert at `now`.
    pub fn stamp_created(&mut self, now: DateTime<Utc>) {
        if self.id.is_nil() {
            self.id = Uuid::new_v4();
        }
        self.create_date_time = now;
        self.modify_date_time = None;
        self.is_active = true;
    }

    /// Record a modification at `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.modify_date_time = Some(now);
    }

    /// Soft-delete: clear the active flag and record the change.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.touch(now);
    }

    /// Base column values in [`BASE_COLUMNS`] order.
    pub fn values(&self) -> [ColumnValue; 4] {
        [
            ColumnValue::Uuid(Some(self.id)),
            ColumnValue::Timestamp(Some(self.create_date_time)),
            ColumnValue::Timestamp(self.modify_date_time),
            ColumnValue::Bool(Some(self.is_active)),
        ]
    }
}

impl Default for EntityBase {
    fn default() -> Self {
        Self::new()
    }
}

/// A row type the generic repository can persist.
///
/// Implementors embed an [`EntityBase`] (flattened for both serde and
/// `sqlx`) and report their remaining columns through [`Entity::columns`].
/// `TABLE` and the column names are spliced into SQL verbatim and must be
/// trusted identifiers.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    /// Table name.
    const TABLE: &'static str;

    /// Borrow the base fields.
    fn base(&self) -> &EntityBase;

    /// Mutably borrow the base fields.
    fn base_mut(&mut self) -> &mut EntityBase;

    /// Entity-specific columns and their current values, excluding the
    /// base columns.
    fn columns(&self) -> Vec<(&'static str, ColumnValue)>;

    /// Primary key shortcut.
    fn id(&self) -> Uuid {
        self.base().id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_base_is_active() {
        let base = EntityBase::new();
        assert!(base.is_active);
        assert!(base.modify_date_time.is_none());
        assert!(!base.id.is_nil());
    }

    #[test]
    fn test_deactivate_sets_flag_and_timestamp() {
        let mut base = EntityBase::new();
        let now = Utc::now();
        base.deactivate(now);
        assert!(!base.is_active);
        assert_eq!(base.modify_date_time, Some(now));
    }

    #[test]
    fn test_stamp_created_resets_state() {
        let mut base = EntityBase {
            id: Uuid::nil(),
            create_date_time: Utc::now(),
            modify_date_time: Some(Utc::now()),
            is_active: false,
        };
        let now = Utc::now();
        base.stamp_created(now);
        assert!(!base.id.is_nil());
        assert_eq!(base.create_date_time, now);
        assert!(base.modify_date_time.is_none());
        assert!(base.is_active);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(EntityBase::new()).unwrap();
        assert!(json.get("createDateTime").is_some());
        assert!(json.get("isActive").is_some());
    }
}
