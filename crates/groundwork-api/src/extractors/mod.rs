//! Custom Axum extractors.

pub mod inbound;
pub mod json;
pub mod language;
pub mod paging;

pub use inbound::Inbound;
pub use json::ValidatedJson;
pub use language::Language;
pub use paging::Paging;
