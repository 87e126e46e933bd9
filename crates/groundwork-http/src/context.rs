//! Values carried over from the inbound request.

/// The parts of the inbound request an outbound call forwards.
///
/// Handlers build this from their own request headers and hand it to
/// [`crate::ClientRegistry::builder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundContext {
    /// Raw inbound `Authorization` header.
    pub authorization: Option<String>,
    /// Raw inbound `Accept-Language` header.
    pub accept_language: Option<String>,
}

impl InboundContext {
    /// A context with neither header, for calls made outside a request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw `Authorization` value.
    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    /// Set the raw `Accept-Language` value.
    pub fn with_accept_language(mut self, value: impl Into<String>) -> Self {
        self.accept_language = Some(value.into());
        self
    }

    /// The inbound token with any `Bearer` scheme removed, if non-empty.
    pub fn bearer_token(&self) -> Option<String> {
        let raw = self.authorization.as_deref()?.trim();
        let token = match raw.get(..6) {
            Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => raw[6..].trim(),
            _ => raw,
        };
        (!token.is_empty()).then(|| token.to_string())
    }
}
