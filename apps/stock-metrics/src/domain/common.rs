//! Envelope and paging shapes shared by every endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Start of the range.
    pub start_date: DateTime<Utc>,
    /// End of the range.
    pub end_date: DateTime<Utc>,
}

impl DateRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Check whether `at` falls inside the range.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start_date <= at && at <= self.end_date
    }
}

/// Standard API response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error description on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Optional informational message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response time.
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            timestamp: Utc::now(),
        }
    }

    /// Failed response carrying an error description.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach an informational message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Paging request parameters. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Requested page.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Field to sort by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total items across all pages.
    pub total: usize,
    /// Current page (1-based).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

impl<T: Clone> PaginatedResponse<T> {
    /// Slice one page out of the full result set.
    ///
    /// Page 0 is treated as page 1; a zero limit yields an empty page.
    #[must_use]
    pub fn from_items(all: &[T], params: &PaginationParams) -> Self {
        let page = params.page.max(1);
        let limit = params.limit as usize;
        let offset = (page as usize - 1).saturating_mul(limit);

        let items: Vec<T> = all.iter().skip(offset).take(limit).cloned().collect();
        let has_next = limit > 0 && offset.saturating_add(limit) < all.len();

        Self {
            items,
            total: all.len(),
            page,
            limit: params.limit,
            has_next,
            has_prev: page > 1,
        }
    }
}
