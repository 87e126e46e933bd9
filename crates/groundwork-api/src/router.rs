//! Route definitions for the Groundwork HTTP API.
//!
//! All routes are mounted under `/api`. Every response passes through the
//! error renderer, so business errors reach clients as localized envelopes.

use axum::http::{Method, Uri};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::get,
};
use tower_http::trace::TraceLayer;

use groundwork_core::error::AppError;
use groundwork_core::message::codes;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(message_routes())
        .method_not_allowed_fallback(method_not_allowed);

    Router::new()
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::errors::render_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::ready))
}

/// Localized message lookup
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(handlers::messages::list_messages))
        .route("/messages/{code}", get(handlers::messages::get_message))
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::new(
        codes::METHOD_NOT_ALLOWED,
        format!("{method} is not allowed on {}", uri.path()),
    )
}
