//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod database;
pub mod http;
pub mod localization;
pub mod logging;

use std::collections::HashMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::http::HttpConfig;
use self::localization::LocalizationConfig;
use self::logging::LoggingConfig;

pub use self::database::DatabaseConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Resource sets and cultures.
    #[serde(default)]
    pub localization: LocalizationConfig,
    /// Named outbound HTTP clients.
    #[serde(default)]
    pub http: HttpConfig,
    /// Extra or overriding code → HTTP status entries.
    #[serde(default)]
    pub http_status: HashMap<String, u16>,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `GROUNDWORK__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GROUNDWORK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse the `[http_status]` overrides into status codes.
    pub fn status_overrides(&self) -> Result<HashMap<String, StatusCode>, AppError> {
        self.http_status
            .iter()
            .map(|(code, status)| {
                StatusCode::from_u16(*status)
                    .map(|s| (code.clone(), s))
                    .map_err(|e| {
                        AppError::configuration(format!(
                            "Invalid HTTP status {status} for code '{code}': {e}"
                        ))
                    })
            })
            .collect()
    }
}
