//! Unified business error type for Groundwork.
//!
//! Every failure that crosses a crate boundary is an [`AppError`] carrying a
//! string message code from [`crate::message::codes`]. The API layer turns
//! the code into an HTTP status and a localized message; the `message` field
//! is only for logs.

use axum::Json;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::message::{self, codes};
use crate::types::response::ResponseBase;

/// The single error type raised by validators, repositories and the
/// outbound communicator.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct AppError {
    /// Business message code, e.g. `"2"` for a missing parameter.
    pub code: String,
    /// Internal description. Never shown to API callers.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with a code and internal description.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        code: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an error that carries only a code.
    pub fn business(code: impl Into<String>) -> Self {
        let code = code.into();
        let message = format!("Business rule violated ({code})");
        Self::new(code, message)
    }

    /// Create an unhandled/internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(codes::UNHANDLED_ERROR, message)
    }

    /// Create an invalid-parameter error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(codes::INVALID_PARAMETER, message)
    }

    /// Create a missing-parameter error.
    pub fn required_parameter(message: impl Into<String>) -> Self {
        Self::new(codes::REQUIRED_PARAMETER, message)
    }

    /// Create a downstream-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(codes::EXTERNAL_SERVICE_ERROR, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(codes::NOT_FOUND, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(codes::CONFLICT, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(codes::SERVER_ERROR, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(codes::SERVER_ERROR, message)
    }

    /// Check whether this error carries the given code.
    pub fn has_code(&self, code: &str) -> bool {
        self.code == code
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            code: self.code.clone(),
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            codes::INVALID_PARAMETER,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(codes::SERVER_ERROR, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            codes::SERVER_ERROR,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// Renders an unlocalized failure envelope with the built-in status and
/// keeps the error in the response extensions, where the API layer's error
/// middleware picks it up to localize the message and apply configured
/// status overrides.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = message::default_status(&self.code);
        let body = ResponseBase::<()>::failure(self.code.clone(), None);
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}
