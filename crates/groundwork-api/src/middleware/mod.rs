//! HTTP middleware.

pub mod errors;
pub mod logging;
