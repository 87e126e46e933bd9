//! PostgreSQL connection pool management.
//!
//! The database is optional: an empty URL in `[database]` means the
//! application runs without a pool, and [`DatabasePool::connect_optional`]
//! returns `None`.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use groundwork_core::config::DatabaseConfig;
use groundwork_core::error::AppError;
use groundwork_core::message::codes;
use groundwork_core::result::AppResult;

/// Wrapper around the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect when a URL is configured, otherwise return `None`.
    pub async fn connect_optional(config: &DatabaseConfig) -> AppResult<Option<Self>> {
        if !config.is_enabled() {
            warn!("No database URL configured; repositories are unavailable");
            return Ok(None);
        }
        Self::connect(config).await.map(Some)
    }

    /// Create a pool from configuration.
    ///
    /// Fails with a configuration error before touching the network when the
    /// URL is empty or the pool bounds are inconsistent.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = pool_options(config)?;

        info!(
            url = %mask_password(&config.url),
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = options.connect(&config.url).await.map_err(|e| {
            AppError::with_source(
                codes::SERVER_ERROR,
                format!("Failed to connect to {}", mask_password(&config.url)),
                e,
            )
        })?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying sqlx pool, for repositories.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run `SELECT 1`. A failed probe is a `SERVICE_UNAVAILABLE` error.
    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| {
                warn!(error = %e, "Database health check failed");
                AppError::with_source(codes::SERVICE_UNAVAILABLE, "Database health check failed", e)
            })
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Validate the `[database]` section and turn it into pool options.
fn pool_options(config: &DatabaseConfig) -> AppResult<PgPoolOptions> {
    if !config.is_enabled() {
        return Err(AppError::configuration("database.url is empty"));
    }
    if config.max_connections == 0 {
        return Err(AppError::configuration(
            "database.max_connections must be at least 1",
        ));
    }
    if config.min_connections > config.max_connections {
        return Err(AppError::configuration(format!(
            "database.min_connections ({}) exceeds max_connections ({})",
            config.min_connections, config.max_connections
        )));
    }

    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds)))
}

/// Mask the password portion of a database URL for safe logging.
fn mask_password(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    if let Some(at_pos) = url.rfind('@').filter(|p| *p >= scheme_end) {
        if let Some(colon_pos) = url[scheme_end..at_pos].find(':') {
            let colon_pos = scheme_end + colon_pos;
            return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
        }
    }
    url.to_string()
}
