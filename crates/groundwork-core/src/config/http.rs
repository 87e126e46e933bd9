//! Outbound HTTP client configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Named outbound HTTP clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Client settings keyed by the name passed to the communicator builder.
    #[serde(default)]
    pub clients: HashMap<String, HttpClientConfig>,
    /// Timeout applied to the unnamed fallback client.
    #[serde(default = "default_timeout")]
    pub default_timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            clients: HashMap::new(),
            default_timeout_seconds: default_timeout(),
        }
    }
}

/// Settings for one named client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Base URL that relative URI templates are joined onto.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Headers sent on every request made with this client.
    #[serde(default)]
    pub default_headers: HashMap<String, String>,
    /// `User-Agent` override.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_seconds: default_timeout(),
            default_headers: HashMap::new(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}
