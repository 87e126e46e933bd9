//! Response envelopes returned by every API endpoint.

use serde::{Deserialize, Serialize};

use crate::types::pagination::PagingResponse;

/// Standard single-payload envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBase<T> {
    /// Response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Whether the request succeeded.
    pub success: bool,
    /// Business message code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Localized message for `code`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ResponseBase<T> {
    /// A successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            code: None,
            message: None,
        }
    }

    /// A failed envelope with a code and optional localized message.
    pub fn failure(code: impl Into<String>, message: Option<String>) -> Self {
        Self {
            data: None,
            success: false,
            code: Some(code.into()),
            message,
        }
    }
}

/// Envelope for list payloads with paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseListBase<T> {
    /// Items on this page. Always present, possibly empty.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Whether the request succeeded.
    pub success: bool,
    /// Business message code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Localized message for `code`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Page index, size and count.
    #[serde(flatten)]
    pub paging: PagingResponse,
}
