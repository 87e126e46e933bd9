//! Core type definitions used across the Groundwork workspace.

pub mod filter;
pub mod language;
pub mod pagination;
pub mod response;
pub mod sorting;

pub use filter::{Filter, FilterField, FilterOp, FilterValue};
pub use language::{LanguageRange, parse_accept_language};
pub use pagination::{PagingRequest, PagingResponse};
pub use response::{ResponseBase, ResponseListBase};
pub use sorting::{SortDirection, SortField};
