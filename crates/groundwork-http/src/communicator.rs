//! Fluent builder and executor for one outbound call.
//!
//! The builder is a chain of step types so the mandatory settings are
//! supplied in order:
//!
//! ```rust,ignore
//! let reply: Reply<Invoice> = registry
//!     .builder(inbound)
//!     .client("billing")
//!     .uri("invoices/{id}")
//!     .method(Method::GET)
//!     .content_type(content_type::APPLICATION_JSON)
//!     .paths([("id", invoice_id.to_string())])
//!     .build()
//!     .call_empty()
//!     .await?;
//! ```

use std::time::Instant;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use groundwork_core::error::AppError;
use groundwork_core::message::codes;
use groundwork_core::result::AppResult;
use groundwork_core::types::language::{format_accept_language, parse_accept_language};

use crate::body::{Reply, RequestBody};
use crate::client::{ClientRegistry, NamedClient};
use crate::content_type;
use crate::context::InboundContext;
use crate::uri;

/// First step: pick the named client.
pub struct ClientStep<'a> {
    registry: &'a ClientRegistry,
    context: InboundContext,
}

impl<'a> ClientStep<'a> {
    pub(crate) fn new(registry: &'a ClientRegistry, context: InboundContext) -> Self {
        Self { registry, context }
    }

    /// Pick a named client; unknown names get the default client.
    pub fn client(self, name: &str) -> UriStep {
        UriStep {
            client: self.registry.get(name).clone(),
            context: self.context,
        }
    }
}

/// Second step: the URI template, absolute or relative to the client's
/// base URL, with optional `{key}` placeholders.
pub struct UriStep {
    client: NamedClient,
    context: InboundContext,
}

impl UriStep {
    /// Set the URI template.
    pub fn uri(self, template: impl Into<String>) -> MethodStep {
        MethodStep {
            client: self.client,
            context: self.context,
            template: template.into(),
        }
    }
}

/// Third step: the HTTP method.
pub struct MethodStep {
    client: NamedClient,
    context: InboundContext,
    template: String,
}

impl MethodStep {
    /// Set the HTTP method. Unsupported methods fail when the call is made.
    pub fn method(self, method: Method) -> ContentTypeStep {
        ContentTypeStep {
            client: self.client,
            context: self.context,
            template: self.template,
            method,
        }
    }
}

/// Fourth step: the content type sent and accepted.
pub struct ContentTypeStep {
    client: NamedClient,
    context: InboundContext,
    template: String,
    method: Method,
}

impl ContentTypeStep {
    /// Set the content type of the body and of the expected reply.
    pub fn content_type(self, content_type: impl Into<String>) -> CommunicatorBuilder {
        CommunicatorBuilder {
            communicator: Communicator {
                client: self.client,
                context: self.context,
                template: self.template,
                method: self.method,
                content_type: content_type.into(),
                bearer: None,
                headers: Vec::new(),
                queries: Vec::new(),
                paths: Vec::new(),
            },
        }
    }
}

/// Final step: optional settings, then [`CommunicatorBuilder::build`].
pub struct CommunicatorBuilder {
    communicator: Communicator,
}

impl CommunicatorBuilder {
    /// Explicit bearer token; overrides the inbound `Authorization` header.
    pub fn auth(mut self, bearer: impl Into<String>) -> Self {
        self.communicator.bearer = Some(bearer.into());
        self
    }

    /// Extra request headers. Entries with an empty name or value are skipped
    /// when the call is made.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.communicator
            .headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Query parameters, appended in order.
    pub fn queries<I, K, V>(mut self, queries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.communicator
            .queries
            .extend(queries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Values for `{key}` placeholders in the URI template.
    pub fn paths<I, K, V>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.communicator
            .paths
            .extend(paths.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Finish the chain.
    pub fn build(self) -> Communicator {
        self.communicator
    }
}

/// A fully configured outbound call.
pub struct Communicator {
    client: NamedClient,
    context: InboundContext,
    template: String,
    method: Method,
    content_type: String,
    bearer: Option<String>,
    headers: Vec<(String, String)>,
    queries: Vec<(String, String)>,
    paths: Vec<(String, String)>,
}

impl Communicator {
    /// The URL the call will be sent to.
    pub fn url(&self) -> AppResult<Url> {
        uri::resolve(
            self.client.base_url.as_ref(),
            &self.template,
            &self.paths,
            &self.queries,
        )
    }

    /// Send the call without a body.
    pub async fn call_empty<T: DeserializeOwned>(self) -> AppResult<Reply<T>> {
        self.call(RequestBody::Empty).await
    }

    /// Send the call with `body` and decode the reply.
    ///
    /// JSON replies are decoded into `T`; anything else is returned as text.
    /// Non-2xx statuses are not errors. Transport and decoding failures
    /// become `EXTERNAL_SERVICE_ERROR`.
    pub async fn call<T: DeserializeOwned>(self, body: RequestBody) -> AppResult<Reply<T>> {
        ensure_supported(&self.method)?;
        let url = self.url()?;

        let request = self
            .client
            .client
            .request(self.method.clone(), url.clone());
        let request = self.apply_headers(request);
        let request = self.apply_body(request, body);

        let started = Instant::now();
        let response = request.send().await.map_err(|e| self.transport_error(&url, e))?;

        let status = response.status();
        let reply_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_default();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&url, e))?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        info!(
            client = %self.client.name,
            method = %self.method,
            uri = %url,
            status = status.as_u16(),
            elapsed_ms,
            "Outbound HTTP call"
        );
        debug!(uri = %url, body = %text, "Outbound HTTP reply");
        if !status.is_success() {
            warn!(
                client = %self.client.name,
                uri = %url,
                status = status.as_u16(),
                "Outbound HTTP call returned a non-success status"
            );
        }

        if text.is_empty() {
            return Ok(Reply::Empty);
        }
        if content_type::is_json(&reply_type) {
            let value = serde_json::from_str(&text).map_err(|e| {
                AppError::with_source(
                    codes::EXTERNAL_SERVICE_ERROR,
                    format!("Undecodable JSON reply from {url}"),
                    e,
                )
            })?;
            return Ok(Reply::Json(value));
        }
        Ok(Reply::Text(text))
    }

    fn bearer_token(&self) -> Option<String> {
        match self.bearer.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Some(token.to_string()),
            _ => self.context.bearer_token(),
        }
    }

    fn apply_headers(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }

        let accept = if self.content_type.is_empty() {
            content_type::APPLICATION_JSON
        } else {
            self.content_type.as_str()
        };
        request = request.header(ACCEPT, accept);

        if let Some(header) = self.context.accept_language.as_deref() {
            let ranges = parse_accept_language(header);
            if !ranges.is_empty() {
                request = request.header(ACCEPT_LANGUAGE, format_accept_language(&ranges));
            }
        }

        for (name, value) in &self.headers {
            if name.is_empty() || value.is_empty() {
                continue;
            }
            request = request.header(name.as_str(), value.as_str());
        }
        request
    }

    fn apply_body(&self, request: RequestBuilder, body: RequestBody) -> RequestBuilder {
        if matches!(self.method, Method::GET | Method::DELETE) {
            if !matches!(body, RequestBody::Empty) {
                debug!(method = %self.method, kind = body.kind(), "Dropping body on bodiless method");
            }
            return request;
        }

        match body {
            RequestBody::Empty => request,
            RequestBody::Multipart(form) => request.multipart(form),
            RequestBody::Json(value) => request
                .header(CONTENT_TYPE, content_type::APPLICATION_JSON)
                .body(value.to_string()),
            RequestBody::Text(text) => {
                let declared = if self.content_type.is_empty() {
                    content_type::TEXT_PLAIN
                } else {
                    self.content_type.as_str()
                };
                let header = if content_type::is_text(declared) {
                    format!("{declared}; charset=utf-8")
                } else {
                    declared.to_string()
                };
                request.header(CONTENT_TYPE, header).body(text)
            }
        }
    }

    fn transport_error(&self, url: &Url, error: reqwest::Error) -> AppError {
        warn!(client = %self.client.name, uri = %url, error = %error, "Outbound HTTP call failed");
        AppError::with_source(
            codes::EXTERNAL_SERVICE_ERROR,
            format!("Call to {url} failed"),
            error,
        )
    }
}

/// Only the five common verbs are supported.
fn ensure_supported(method: &Method) -> AppResult<()> {
    match *method {
        Method::GET | Method::POST | Method::PUT | Method::PATCH | Method::DELETE => Ok(()),
        _ => Err(AppError::validation(format!(
            "Unsupported outbound HTTP method {method}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use groundwork_core::config::http::HttpConfig;

    use super::*;

    fn registry() -> ClientRegistry {
        ClientRegistry::from_config(&HttpConfig::default()).unwrap()
    }

    #[test]
    fn test_ensure_supported() {
        assert!(ensure_supported(&Method::PATCH).is_ok());
        let err = ensure_supported(&Method::OPTIONS).unwrap_err();
        assert!(err.has_code(codes::INVALID_PARAMETER));
    }

    #[test]
    fn test_builder_collects_settings() {
        let communicator = registry()
            .builder(InboundContext::new())
            .client("missing")
            .uri("http://svc.local/items/{id}")
            .method(Method::GET)
            .content_type(content_type::APPLICATION_JSON)
            .paths([("id", "9")])
            .queries([("expand", "all")])
            .build();
        assert_eq!(
            communicator.url().unwrap().as_str(),
            "http://svc.local/items/9?expand=all"
        );
    }

    #[test]
    fn test_explicit_bearer_overrides_inbound() {
        let communicator = registry()
            .builder(InboundContext::new().with_authorization("Bearer inbound"))
            .client("x")
            .uri("http://svc.local")
            .method(Method::GET)
            .content_type("")
            .auth("explicit")
            .build();
        assert_eq!(communicator.bearer_token().as_deref(), Some("explicit"));
    }

    #[test]
    fn test_blank_bearer_falls_back_to_inbound() {
        let communicator = registry()
            .builder(InboundContext::new().with_authorization("Bearer inbound"))
            .client("x")
            .uri("http://svc.local")
            .method(Method::GET)
            .content_type("")
            .auth("  ")
            .build();
        assert_eq!(communicator.bearer_token().as_deref(), Some("inbound"));
    }

    #[tokio::test]
    async fn test_unsupported_method_fails_before_sending() {
        let err = registry()
            .builder(InboundContext::new())
            .client("x")
            .uri("http://127.0.0.1:1/never")
            .method(Method::HEAD)
            .content_type(content_type::APPLICATION_JSON)
            .build()
            .call_empty::<serde_json::Value>()
            .await
            .unwrap_err();
        assert!(err.has_code(codes::INVALID_PARAMETER));
    }
}
