//! # groundwork-api
//!
//! Axum integration for Groundwork.
//!
//! Provides the shared application state, the response factory that fills
//! envelope messages from the localizer, the code → status container, the
//! middleware that renders [`groundwork_core::AppError`] as a localized
//! failure envelope, request extractors, and the health and message routes.

pub mod app;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;
pub mod status;

pub use app::{build_state, run_server};
pub use response::ResponseFactory;
pub use router::build_router;
pub use state::AppState;
pub use status::HttpStatusContainer;
