//! # groundwork-database
//!
//! PostgreSQL connection management and [`PgRepository`], the generic
//! soft-delete repository that backs every entity implementing
//! [`groundwork_entity::Entity`].

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::PgRepository;
