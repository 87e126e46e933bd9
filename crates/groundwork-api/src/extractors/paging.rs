//! Paging query parameter extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use groundwork_core::error::AppError;
use groundwork_core::message::codes;
use groundwork_core::types::pagination::PagingRequest;

/// `?index=<n>&size=<n>` bound into a [`PagingRequest`]. Both keys are
/// optional and default to 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paging(pub PagingRequest);

impl<S: Send + Sync> FromRequestParts<S> for Paging {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(request) = Query::<PagingRequest>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::new(codes::INVALID_PARAMETER, e.body_text()))?;
        Ok(Paging(request))
    }
}
