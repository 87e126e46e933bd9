//! Application builder: wires configuration into state and serves the router.

use tokio::net::TcpListener;
use tracing::{error, info};

use groundwork_core::config::AppConfig;
use groundwork_core::error::AppError;
use groundwork_core::message::codes;
use groundwork_core::result::AppResult;
use groundwork_database::DatabasePool;
use groundwork_locale::MultipleStringLocalizer;

use crate::router::build_router;
use crate::state::AppState;

/// Initialize every service the API needs.
///
/// The database pool is only created when a URL is configured.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let db = DatabasePool::connect_optional(&config.database).await?;

    let localizer = MultipleStringLocalizer::from_config(&config.localization)?;
    info!(
        resources_dir = %config.localization.resources_dir,
        custom_set = %config.localization.custom_set,
        generic_set = %config.localization.generic_set,
        "Localization resources loaded"
    );

    AppState::new(config, db, localizer)
}

/// Serve the API until Ctrl+C, then close the database pool.
pub async fn run_server(state: AppState) -> AppResult<()> {
    let addr = state.config.server.bind_address();
    let db = state.db.clone();
    let app = build_router(state);

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(codes::SERVER_ERROR, format!("Failed to bind {addr}"), e)
    })?;
    info!(address = %addr, "Groundwork server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(codes::SERVER_ERROR, "Server error", e))?;

    if let Some(db) = db {
        db.close().await;
    }
    info!("Groundwork server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
