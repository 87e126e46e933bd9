//! `Inbound` extractor: request headers forwarded to outbound calls.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderName;
use axum::http::header::{ACCEPT_LANGUAGE, AUTHORIZATION};
use axum::http::request::Parts;

use groundwork_http::InboundContext;

/// The inbound `Authorization` and `Accept-Language` headers.
#[derive(Debug, Clone, Default)]
pub struct Inbound(pub InboundContext);

impl Inbound {
    /// Unwrap into the context handed to the communicator.
    pub fn into_context(self) -> InboundContext {
        self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Inbound {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: HeaderName| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        Ok(Inbound(InboundContext {
            authorization: header(AUTHORIZATION),
            accept_language: header(ACCEPT_LANGUAGE),
        }))
    }
}
