//! Builds response envelopes with localized messages.

use groundwork_core::types::pagination::{PagingRequest, PagingResponse};
use groundwork_core::types::response::{ResponseBase, ResponseListBase};
use groundwork_locale::{AppMessageFactory, Culture};

/// Creates [`ResponseBase`] and [`ResponseListBase`] envelopes.
///
/// When a code is given, the message is looked up for the caller's culture.
#[derive(Debug, Clone)]
pub struct ResponseFactory {
    messages: AppMessageFactory,
}

impl ResponseFactory {
    /// Envelope builder backed by `messages`.
    pub fn new(messages: AppMessageFactory) -> Self {
        Self { messages }
    }

    /// Successful envelope around `data`, with an optional message code.
    pub fn response<T>(&self, data: Option<T>, code: Option<&str>, culture: &Culture) -> ResponseBase<T> {
        ResponseBase {
            data,
            success: true,
            code: code.map(str::to_string),
            message: code.and_then(|c| self.messages.message(c, culture)),
        }
    }

    /// Successful envelope with nothing in it.
    pub fn empty(&self) -> ResponseBase<()> {
        ResponseBase {
            data: None,
            success: true,
            code: None,
            message: None,
        }
    }

    /// Successful list envelope. The page size echoes the size actually
    /// applied, so a requested size of 0 is reported as the default.
    pub fn response_list<T>(
        &self,
        items: Vec<T>,
        paging: Option<&PagingRequest>,
        page_count: Option<u64>,
        code: Option<&str>,
        culture: &Culture,
    ) -> ResponseListBase<T> {
        ResponseListBase {
            data: items,
            success: true,
            code: code.map(str::to_string),
            message: code.and_then(|c| self.messages.message(c, culture)),
            paging: PagingResponse::from_request(paging, page_count),
        }
    }

    /// Failed envelope for an error code.
    pub fn failure(&self, code: &str, culture: &Culture) -> ResponseBase<()> {
        ResponseBase::failure(code, self.messages.message(code, culture))
    }
}
