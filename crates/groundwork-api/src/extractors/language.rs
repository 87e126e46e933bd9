//! `Language` extractor: the culture negotiated from `Accept-Language`.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;

use groundwork_locale::Culture;

use crate::state::AppState;

/// The culture responses should be localized in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language(pub Culture);

impl std::ops::Deref for Language {
    type Target = Culture;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for Language {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        Ok(Language(state.negotiate(header)))
    }
}
