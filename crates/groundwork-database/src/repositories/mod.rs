//! Repository implementations.

pub mod generic;
mod sql;

pub use generic::PgRepository;
