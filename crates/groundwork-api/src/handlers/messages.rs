//! Localized message lookup handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use groundwork_core::error::AppError;
use groundwork_core::types::pagination::page_count;
use groundwork_core::types::response::{ResponseBase, ResponseListBase};
use groundwork_locale::StringLocalizer;

use crate::extractors::{Language, Paging};
use crate::state::AppState;

/// One localized message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    /// Message code that was looked up.
    pub code: String,
    /// Negotiated culture the text is in.
    pub culture: String,
    /// Localized text.
    pub text: String,
}

/// GET /api/messages/{code}
pub async fn get_message(
    State(state): State<AppState>,
    Language(culture): Language,
    Path(code): Path<String>,
) -> Result<Json<ResponseBase<MessageResponse>>, AppError> {
    let text = state
        .messages
        .message(&code, &culture)
        .ok_or_else(|| AppError::not_found(format!("No message for code '{code}'")))?;

    Ok(Json(ResponseBase::ok(MessageResponse {
        code,
        culture: culture.to_string(),
        text,
    })))
}

/// GET /api/messages?index=&size=
///
/// Every string for the negotiated culture, generic set first.
pub async fn list_messages(
    State(state): State<AppState>,
    Language(culture): Language,
    Paging(paging): Paging,
) -> Json<ResponseListBase<MessageResponse>> {
    let all = state.localizer.all_strings(&culture, true);
    let total = all.len() as u64;

    let items = all
        .into_iter()
        .skip(usize::try_from(paging.offset()).unwrap_or(usize::MAX))
        .take(paging.effective_size() as usize)
        .map(|s| MessageResponse {
            code: s.name,
            culture: culture.to_string(),
            text: s.value,
        })
        .collect();

    Json(state.responses.response_list(
        items,
        Some(&paging),
        Some(page_count(total, paging.effective_size())),
        None,
        &culture,
    ))
}
