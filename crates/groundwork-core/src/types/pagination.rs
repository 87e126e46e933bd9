//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Page size used when the caller sends `size=0` or omits it.
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Maximum page size.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Paging parameters bound from the `index` and `size` query keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingRequest {
    /// Page index (0-based).
    #[serde(default)]
    pub index: u32,
    /// Number of items per page; `0` selects [`DEFAULT_PAGE_SIZE`].
    #[serde(default)]
    pub size: u32,
}

impl PagingRequest {
    /// Create a new paging request.
    pub fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// The page size actually applied to queries.
    pub fn effective_size(&self) -> u32 {
        match self.size {
            0 => DEFAULT_PAGE_SIZE,
            size => size.min(MAX_PAGE_SIZE),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        i64::from(self.index) * i64::from(self.effective_size())
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        i64::from(self.effective_size())
    }
}

/// Paging metadata attached to list envelopes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingResponse {
    /// Index of the returned page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_index: Option<u32>,
    /// Size of the returned page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Total number of pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
}

impl PagingResponse {
    /// Build metadata from the request that produced the page.
    pub fn from_request(request: Option<&PagingRequest>, page_count: Option<u64>) -> Self {
        Self {
            page_index: request.map(|r| r.index),
            page_size: request.map(PagingRequest::effective_size),
            page_count,
        }
    }
}

/// Number of pages needed to hold `total_items` at `page_size` per page.
pub fn page_count(total_items: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(u64::from(page_size))
}
