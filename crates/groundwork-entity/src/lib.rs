//! # groundwork-entity
//!
//! The base entity every persisted record embeds, and the [`Entity`] trait
//! the generic repository uses to read and write rows. Concrete entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize` and `sqlx::FromRow`,
//! flatten [`EntityBase`] into themselves, and list their own columns.

pub mod base;
pub mod column;

pub use base::{Entity, EntityBase};
pub use column::ColumnValue;
