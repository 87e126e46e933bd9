//! JSON body extractor that runs `validator` rules.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use validator::Validate;

use groundwork_core::error::AppError;
use groundwork_core::message::codes;
use groundwork_core::validation;

/// A JSON body that has passed its validation rules.
///
/// Parse failures and the first failing rule become an [`AppError`], so the
/// client gets the same localized envelope as any other business error.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;
        validation::validate(&value)?;
        Ok(ValidatedJson(value))
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    let code = match rejection.status() {
        StatusCode::UNSUPPORTED_MEDIA_TYPE => codes::UNSUPPORTED_MEDIA_TYPE,
        StatusCode::PAYLOAD_TOO_LARGE => codes::CONTENT_TOO_LARGE,
        _ => codes::INVALID_PARAMETER,
    };
    AppError::new(code, rejection.body_text())
}
