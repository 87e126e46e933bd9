//! Health check handlers.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use groundwork_core::error::AppError;
use groundwork_core::types::response::ResponseBase;

use crate::state::AppState;

/// Liveness payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
    /// Crate version of the running server.
    pub version: String,
}

/// Readiness payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// `ready` once every configured dependency answered.
    pub status: String,
    /// `up`, or `disabled` when no database is configured.
    pub database: String,
}

/// GET /api/health
pub async fn health() -> Json<ResponseBase<HealthResponse>> {
    Json(ResponseBase::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/ready
///
/// Probes the database when one is configured; a failed probe is a 503.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ResponseBase<ReadinessResponse>>, AppError> {
    let database = match &state.db {
        Some(db) => {
            db.health_check().await?;
            "up"
        }
        None => "disabled",
    };

    Ok(Json(ResponseBase::ok(ReadinessResponse {
        status: "ready".to_string(),
        database: database.to_string(),
    })))
}
