//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use groundwork_core::config::AppConfig;
use groundwork_core::result::AppResult;
use groundwork_database::DatabasePool;
use groundwork_http::ClientRegistry;
use groundwork_locale::{AppMessageFactory, Culture, MultipleStringLocalizer};

use crate::response::ResponseFactory;
use crate::status::HttpStatusContainer;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, absent when no database URL is configured
    pub db: Option<DatabasePool>,
    /// Custom-then-generic string localizer
    pub localizer: Arc<MultipleStringLocalizer>,
    /// Message code lookup
    pub messages: AppMessageFactory,
    /// Envelope builder
    pub responses: ResponseFactory,
    /// Code → HTTP status table
    pub statuses: Arc<HttpStatusContainer>,
    /// Named outbound HTTP clients
    pub clients: Arc<ClientRegistry>,
    /// Cultures the API answers in
    pub supported_cultures: Arc<[Culture]>,
    /// Culture used when negotiation finds nothing supported
    pub default_culture: Culture,
}

impl AppState {
    /// Wire the state from configuration and already-initialized services.
    pub fn new(
        config: AppConfig,
        db: Option<DatabasePool>,
        localizer: MultipleStringLocalizer,
    ) -> AppResult<Self> {
        let mut statuses = HttpStatusContainer::default();
        statuses.add_or_update_from(config.status_overrides()?);

        let clients = ClientRegistry::from_config(&config.http)?;

        let default_culture = Culture::new(&config.localization.default_culture);
        let mut supported: Vec<Culture> = config
            .localization
            .supported_cultures
            .iter()
            .map(|c| Culture::new(c))
            .collect();
        if !supported.contains(&default_culture) {
            supported.push(default_culture.clone());
        }

        let localizer = Arc::new(localizer);
        let messages = AppMessageFactory::new(localizer.clone());

        Ok(Self {
            config: Arc::new(config),
            db,
            responses: ResponseFactory::new(messages.clone()),
            messages,
            localizer,
            statuses: Arc::new(statuses),
            clients: Arc::new(clients),
            supported_cultures: supported.into(),
            default_culture,
        })
    }

    /// Pick the response culture for an `Accept-Language` header.
    pub fn negotiate(&self, accept_language: Option<&str>) -> Culture {
        Culture::negotiate(accept_language, &self.supported_cultures, &self.default_culture)
    }
}
