//! Core traits defined in `groundwork-core` and implemented by other crates.

pub mod repository;

pub use repository::Repository;
