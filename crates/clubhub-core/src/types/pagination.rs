//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_LIMIT: u64 = 25;
/// Maximum page size.
const MAX_LIMIT: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page, capped at 100.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl PageRequest {
    /// Create a new page request; the limit is clamped to `1..=100`.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.limit
    }

    /// Return the SQL `LIMIT` value.
    pub fn sql_limit(&self) -> u64 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata attached to every list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

/// Paginated response envelope.
///
/// Serializes as `{ "data": [...], "meta": { ... } }` uniformly across
/// members, bans, and join requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: &PageRequest, total: u64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(page.limit)
        };
        Self {
            data,
            meta: PageMeta {
                page: page.page,
                limit: page.limit,
                total,
                total_pages,
            },
        }
    }

}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(PageRequest::new(1, 500).limit, 100);
        assert_eq!(PageRequest::new(1, 0).limit, 1);
        assert_eq!(PageRequest::new(0, 25).page, 1);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 25).offset(), 0);
        assert_eq!(PageRequest::new(3, 25).offset(), 50);
    }

    #[test]
    fn test_total_pages() {
        let page = PageRequest::new(1, 10);
        assert_eq!(PageResponse::new(vec![1], &page, 0).meta.total_pages, 1);
        assert_eq!(PageResponse::new(vec![1], &page, 10).meta.total_pages, 1);
        assert_eq!(PageResponse::new(vec![1], &page, 11).meta.total_pages, 2);
    }

    #[test]
    fn test_envelope_shape() {
        let page = PageRequest::new(2, 10);
        let response = PageResponse::new(vec!["a", "b"], &page, 12);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"], serde_json::json!(["a", "b"]));
        assert_eq!(json["meta"]["page"], 2);
        assert_eq!(json["meta"]["limit"], 10);
        assert_eq!(json["meta"]["total"], 12);
        assert_eq!(json["meta"]["total_pages"], 2);
    }
}
