//! Named outbound clients built from configuration.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use tracing::info;

use groundwork_core::config::http::{HttpClientConfig, HttpConfig};
use groundwork_core::error::AppError;
use groundwork_core::message::codes;
use groundwork_core::result::AppResult;

use crate::communicator::ClientStep;
use crate::context::InboundContext;

/// A configured client and the base URL relative URIs are joined onto.
#[derive(Debug, Clone)]
pub struct NamedClient {
    /// Name from `[http.clients.<name>]`; empty for the fallback client.
    pub name: String,
    /// Pooled reqwest client with the configured timeout and headers.
    pub client: Client,
    /// Base that relative URI templates are joined onto.
    pub base_url: Option<Url>,
}

/// All outbound clients, keyed by name.
///
/// Unknown names resolve to a default client with no base URL.
#[derive(Debug, Clone)]
pub struct ClientRegistry {
    clients: HashMap<String, NamedClient>,
    fallback: NamedClient,
}

impl ClientRegistry {
    /// Build one client per configured entry.
    pub fn from_config(config: &HttpConfig) -> AppResult<Self> {
        let mut clients = HashMap::with_capacity(config.clients.len());
        for (name, client_config) in &config.clients {
            let client = build_named(name, client_config)?;
            info!(
                client = %name,
                base_url = client.base_url.as_ref().map(Url::as_str).unwrap_or("-"),
                timeout_seconds = client_config.timeout_seconds,
                "Registered outbound HTTP client"
            );
            clients.insert(name.clone(), client);
        }

        let fallback = Client::builder()
            .timeout(Duration::from_secs(config.default_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(codes::SERVER_ERROR, "Failed to build default HTTP client", e)
            })?;

        Ok(Self {
            clients,
            fallback: NamedClient {
                name: String::new(),
                client: fallback,
                base_url: None,
            },
        })
    }

    /// Look up a client by name.
    pub fn get(&self, name: &str) -> &NamedClient {
        self.clients.get(name).unwrap_or(&self.fallback)
    }

    /// Whether `name` was configured explicitly.
    pub fn contains(&self, name: &str) -> bool {
        self.clients.contains_key(name)
    }

    /// Start building a call that forwards `context` from the inbound request.
    pub fn builder(&self, context: InboundContext) -> ClientStep<'_> {
        ClientStep::new(self, context)
    }
}

fn build_named(name: &str, config: &HttpClientConfig) -> AppResult<NamedClient> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.default_headers {
        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            AppError::with_source(
                codes::SERVER_ERROR,
                format!("Invalid default header name '{key}' for client '{name}'"),
                e,
            )
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            AppError::with_source(
                codes::SERVER_ERROR,
                format!("Invalid default header value for '{key}' on client '{name}'"),
                e,
            )
        })?;
        headers.insert(header_name, header_value);
    }

    let mut builder = Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .default_headers(headers);
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.as_str());
    }
    let client = builder.build().map_err(|e| {
        AppError::with_source(
            codes::SERVER_ERROR,
            format!("Failed to build HTTP client '{name}'"),
            e,
        )
    })?;

    let base_url = config
        .base_url
        .as_deref()
        .map(Url::parse)
        .transpose()
        .map_err(|e| {
            AppError::with_source(
                codes::SERVER_ERROR,
                format!("Invalid base URL for client '{name}'"),
                e,
            )
        })?;

    Ok(NamedClient {
        name: name.to_string(),
        client,
        base_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> HttpConfig {
        let mut clients = HashMap::new();
        clients.insert(
            "billing".to_string(),
            HttpClientConfig {
                base_url: Some("http://billing.local/api/".to_string()),
                ..HttpClientConfig::default()
            },
        );
        HttpConfig {
            clients,
            default_timeout_seconds: 5,
        }
    }

    #[test]
    fn test_named_client_is_registered() {
        let registry = ClientRegistry::from_config(&config()).unwrap();
        assert!(registry.contains("billing"));
        let client = registry.get("billing");
        assert_eq!(client.name, "billing");
        assert_eq!(
            client.base_url.as_ref().map(Url::as_str),
            Some("http://billing.local/api/")
        );
    }

    #[test]
    fn test_unknown_name_uses_fallback() {
        let registry = ClientRegistry::from_config(&config()).unwrap();
        assert!(!registry.contains("other"));
        assert!(registry.get("other").base_url.is_none());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut config = config();
        config.clients.insert(
            "broken".to_string(),
            HttpClientConfig {
                base_url: Some("not a url".to_string()),
                ..HttpClientConfig::default()
            },
        );
        let err = ClientRegistry::from_config(&config).unwrap_err();
        assert!(err.has_code(codes::SERVER_ERROR));
    }

    #[test]
    fn test_invalid_default_header_is_rejected() {
        let mut config = config();
        let mut bad = HttpClientConfig::default();
        bad.default_headers
            .insert("bad header".to_string(), "x".to_string());
        config.clients.insert("bad".to_string(), bad);
        assert!(ClientRegistry::from_config(&config).is_err());
    }
}
