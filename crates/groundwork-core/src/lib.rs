//! # groundwork-core
//!
//! Core crate for Groundwork. Contains the business error type and its
//! message codes, the code-to-status table, configuration schemas, paging,
//! filter and envelope types, the generic repository contract, and the
//! validation helpers used by request DTOs.
//!
//! This crate has **no** internal dependencies on other Groundwork crates.

pub mod config;
pub mod error;
pub mod message;
pub mod result;
pub mod traits;
pub mod types;
pub mod validation;

pub use error::AppError;
pub use result::AppResult;
