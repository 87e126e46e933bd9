//! Renders `AppError` responses as localized failure envelopes.

use axum::Json;
use axum::extract::{Request, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use groundwork_core::error::AppError;

use crate::state::AppState;

/// Replace any response produced from an [`AppError`] with a failure
/// envelope whose message is localized for the caller and whose status
/// comes from the configured [`crate::HttpStatusContainer`].
pub async fn render_errors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let accept_language = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut response = next.run(request).await;
    let Some(err) = response.extensions_mut().remove::<AppError>() else {
        return response;
    };

    let status = state.statuses.status(&err.code);
    if status.is_server_error() {
        error!(code = %err.code, status = status.as_u16(), error = %err, "Request failed");
    } else {
        warn!(code = %err.code, status = status.as_u16(), error = %err, "Request rejected");
    }

    let culture = state.negotiate(accept_language.as_deref());
    let body = state.responses.failure(&err.code, &culture);
    (status, Json(body)).into_response()
}
