//! Outbound request bodies and decoded replies.

use std::fmt;

use reqwest::multipart::Form;
use serde::Serialize;

use groundwork_core::result::AppResult;

/// What a communicator sends.
pub enum RequestBody {
    /// No body.
    Empty,
    /// Serialized as `application/json`.
    Json(serde_json::Value),
    /// Sent verbatim with the builder's content type.
    Text(String),
    /// `multipart/form-data`.
    Multipart(Form),
}

impl RequestBody {
    /// Serialize any value as a JSON body. `None` fields are omitted when
    /// the type says so through serde attributes.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> AppResult<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// A raw string body.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// A primitive sent as its display form, e.g. `42` or `true`.
    pub fn primitive(value: impl fmt::Display) -> Self {
        Self::Text(value.to_string())
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Json(_) => "json",
            Self::Text(_) => "text",
            Self::Multipart(_) => "multipart",
        }
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
            other => f.write_str(other.kind()),
        }
    }
}

impl From<Form> for RequestBody {
    fn from(form: Form) -> Self {
        Self::Multipart(form)
    }
}

impl From<String> for RequestBody {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for RequestBody {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// What a communicator got back.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// A JSON reply decoded into `T`.
    Json(T),
    /// Any other non-empty reply, as text.
    Text(String),
    /// An empty body.
    Empty,
}

impl<T> Reply<T> {
    /// The decoded JSON value, if the reply was JSON.
    pub fn into_json(self) -> Option<T> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The raw text, if the reply was not JSON.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether the reply had no body.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
