//! Business message codes and their default HTTP status mapping.
//!
//! Codes are plain strings so that applications can extend the set with
//! their own values; the resource files under `resources/` use the same
//! strings as lookup keys.

use std::collections::HashMap;

use axum::http::StatusCode;

/// Well-known message codes.
pub mod codes {
    /// An error nobody handled.
    pub const UNHANDLED_ERROR: &str = "1";
    /// A required parameter was missing.
    pub const REQUIRED_PARAMETER: &str = "2";
    /// A downstream HTTP service failed.
    pub const EXTERNAL_SERVICE_ERROR: &str = "3";
    /// An e-mail address did not match the accepted pattern.
    pub const AUTH_EMAIL_INVALID: &str = "4";
    /// A project identifier was malformed or unknown.
    pub const PROJECT_ID_INVALID: &str = "5";
    /// Generic invalid input.
    pub const INVALID_PARAMETER: &str = "400";
    /// Missing or invalid credentials.
    pub const UNAUTHORIZED: &str = "401";
    /// Authenticated but not allowed.
    pub const FORBIDDEN: &str = "403";
    /// The requested record does not exist.
    pub const NOT_FOUND: &str = "404";
    /// The route exists but not for this HTTP method.
    pub const METHOD_NOT_ALLOWED: &str = "405";
    /// More than one record matched where one was expected.
    pub const CONFLICT: &str = "409";
    /// Request body too large.
    pub const CONTENT_TOO_LARGE: &str = "413";
    /// Request body media type not accepted.
    pub const UNSUPPORTED_MEDIA_TYPE: &str = "415";
    /// Generic server failure.
    pub const SERVER_ERROR: &str = "500";
    /// A dependency is temporarily down.
    pub const SERVICE_UNAVAILABLE: &str = "503";
}

/// Status returned for any code missing from the table.
pub const DEFAULT_STATUS: StatusCode = StatusCode::BAD_REQUEST;

/// The static code → status table shipped with the library.
pub fn default_status_table() -> HashMap<String, StatusCode> {
    [
        (codes::UNHANDLED_ERROR, StatusCode::INTERNAL_SERVER_ERROR),
        (codes::REQUIRED_PARAMETER, StatusCode::BAD_REQUEST),
        (codes::EXTERNAL_SERVICE_ERROR, StatusCode::SERVICE_UNAVAILABLE),
        (codes::AUTH_EMAIL_INVALID, StatusCode::BAD_REQUEST),
        (codes::PROJECT_ID_INVALID, StatusCode::BAD_REQUEST),
        (codes::INVALID_PARAMETER, StatusCode::BAD_REQUEST),
        (codes::UNAUTHORIZED, StatusCode::UNAUTHORIZED),
        (codes::FORBIDDEN, StatusCode::FORBIDDEN),
        (codes::NOT_FOUND, StatusCode::NOT_FOUND),
        (codes::METHOD_NOT_ALLOWED, StatusCode::METHOD_NOT_ALLOWED),
        (codes::CONFLICT, StatusCode::CONFLICT),
        (codes::CONTENT_TOO_LARGE, StatusCode::PAYLOAD_TOO_LARGE),
        (codes::UNSUPPORTED_MEDIA_TYPE, StatusCode::UNSUPPORTED_MEDIA_TYPE),
        (codes::SERVER_ERROR, StatusCode::INTERNAL_SERVER_ERROR),
        (codes::SERVICE_UNAVAILABLE, StatusCode::SERVICE_UNAVAILABLE),
    ]
    .into_iter()
    .map(|(code, status)| (code.to_string(), status))
    .collect()
}

/// Status for `code` from the built-in table, or [`DEFAULT_STATUS`].
pub fn default_status(code: &str) -> StatusCode {
    default_status_table()
        .get(code)
        .copied()
        .unwrap_or(DEFAULT_STATUS)
}

/// Check whether a code belongs to the built-in set.
pub fn is_known_code(code: &str) -> bool {
    matches!(
        code,
        codes::UNHANDLED_ERROR
            | codes::REQUIRED_PARAMETER
            | codes::EXTERNAL_SERVICE_ERROR
            | codes::AUTH_EMAIL_INVALID
            | codes::PROJECT_ID_INVALID
            | codes::INVALID_PARAMETER
            | codes::UNAUTHORIZED
            | codes::FORBIDDEN
            | codes::NOT_FOUND
            | codes::METHOD_NOT_ALLOWED
            | codes::CONFLICT
            | codes::CONTENT_TOO_LARGE
            | codes::UNSUPPORTED_MEDIA_TYPE
            | codes::SERVER_ERROR
            | codes::SERVICE_UNAVAILABLE
    )
}
