//! Business code → HTTP status lookup.

use std::collections::HashMap;

use axum::http::StatusCode;

use groundwork_core::message::{DEFAULT_STATUS, default_status_table};

/// Maps message codes to HTTP statuses.
///
/// Starts from the built-in table; applications add or override entries.
/// Codes missing from the table map to `400 Bad Request`.
#[derive(Debug, Clone)]
pub struct HttpStatusContainer {
    statuses: HashMap<String, StatusCode>,
}

impl HttpStatusContainer {
    /// Container holding exactly `statuses`.
    pub fn new(statuses: HashMap<String, StatusCode>) -> Self {
        Self { statuses }
    }

    /// Insert each entry, replacing any existing status for the same code.
    pub fn add_or_update_from<I, K>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, StatusCode)>,
        K: Into<String>,
    {
        for (code, status) in entries {
            self.statuses.insert(code.into(), status);
        }
    }

    /// Status for `code`.
    pub fn status(&self, code: &str) -> StatusCode {
        self.statuses.get(code).copied().unwrap_or(DEFAULT_STATUS)
    }

    /// Number of mapped codes.
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Whether no code is mapped.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl Default for HttpStatusContainer {
    fn default() -> Self {
        Self::new(default_status_table())
    }
}
