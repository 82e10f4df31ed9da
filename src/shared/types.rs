use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::shared::constants::MAX_PAGE_SIZE;

/// Error body returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Confirmation body for operations without a resource to return
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// A validated page request (1-indexed page, clamped page size)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    /// Validate raw page parameters. Zero or negative values are rejected,
    /// oversized pages are clamped to `MAX_PAGE_SIZE`, and a page whose
    /// offset would not fit in an i64 is rejected.
    pub fn new(
        page: Option<i64>,
        page_size: Option<i64>,
        default_page_size: i64,
    ) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(default_page_size);

        if page < 1 {
            return Err(AppError::Validation(
                "page must be a positive integer".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(AppError::Validation(
                "pageSize must be a positive integer".to_string(),
            ));
        }

        let page_size = page_size.min(MAX_PAGE_SIZE);
        // The row offset must fit in an i64
        if (page - 1).checked_mul(page_size).is_none() {
            return Err(AppError::Validation("page is out of range".to_string()));
        }

        Ok(Self { page, page_size })
    }

    /// The (skip, take) window for this page
    pub fn window(&self) -> PageWindow {
        PageWindow {
            skip: (self.page - 1) * self.page_size,
            take: self.page_size,
        }
    }
}

/// Offset/limit pair handed to the persistence backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: i64,
    pub take: i64,
}

impl PageWindow {
    pub fn first(take: i64) -> Self {
        Self { skip: 0, take }
    }
}

/// Paginated list envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub current_page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total_items: i64, pagination: Pagination) -> Self {
        Self {
            items,
            total_items,
            current_page: pagination.page,
            page_size: pagination.page_size,
            total_pages: total_pages(total_items, pagination.page_size),
        }
    }

    /// Convert every item, keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

/// ceil(total_items / page_size); zero when nothing matched
pub fn total_pages(total_items: i64, page_size: i64) -> i64 {
    if total_items <= 0 || page_size <= 0 {
        return 0;
    }
    (total_items + page_size - 1) / page_size
}

/// Empty optional text is reported as absent
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse an `{id}` path segment. Anything that is not a UUID cannot name a
/// stored record, so it is reported as missing.
pub fn parse_path_id(raw: &str, noun: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("{} not found", noun)))
}

/// Parse an optional integer query parameter
pub fn parse_i64_param(name: &str, value: Option<&str>) -> Result<Option<i64>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{} must be a positive integer", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::new(None, None, 10).unwrap();
        assert_eq!(p, Pagination { page: 1, page_size: 10 });
        assert_eq!(p.window(), PageWindow { skip: 0, take: 10 });
    }

    #[test]
    fn test_pagination_window_offset() {
        let p = Pagination::new(Some(3), Some(7), 10).unwrap();
        assert_eq!(p.window(), PageWindow { skip: 14, take: 7 });
    }

    #[test]
    fn test_pagination_rejects_non_positive_values() {
        assert!(Pagination::new(Some(0), None, 10).is_err());
        assert!(Pagination::new(Some(-2), None, 10).is_err());
        assert!(Pagination::new(None, Some(0), 10).is_err());
        assert!(Pagination::new(None, Some(-5), 10).is_err());
    }

    #[test]
    fn test_pagination_rejects_page_past_offset_range() {
        let err = Pagination::new(Some(i64::MAX), Some(100), 10).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "page is out of range"));

        let last = i64::MAX / MAX_PAGE_SIZE + 1;
        let p = Pagination::new(Some(last), Some(MAX_PAGE_SIZE), 10).unwrap();
        assert!(p.window().skip > 0);
        assert!(Pagination::new(Some(last + 1), Some(MAX_PAGE_SIZE), 10).is_err());
    }

    #[test]
    fn test_pagination_clamps_page_size() {
        let p = Pagination::new(Some(1), Some(5000), 10).unwrap();
        assert_eq!(p.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 5), 5);
        assert_eq!(total_pages(26, 5), 6);
    }

    #[test]
    fn test_paginated_response_serializes_camel_case() {
        let pagination = Pagination::new(Some(2), Some(2), 10).unwrap();
        let response = PaginatedResponse::new(vec![1, 2], 5, pagination);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalItems"], 5);
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["pageSize"], 2);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_i64_param() {
        assert_eq!(parse_i64_param("page", None).unwrap(), None);
        assert_eq!(parse_i64_param("page", Some("")).unwrap(), None);
        assert_eq!(parse_i64_param("page", Some("4")).unwrap(), Some(4));
        assert!(parse_i64_param("page", Some("four")).is_err());
    }

    #[test]
    fn test_parse_path_id_treats_garbage_as_missing() {
        let id = Uuid::new_v4();
        assert_eq!(parse_path_id(&id.to_string(), "Prompt").unwrap(), id);
        assert!(matches!(
            parse_path_id("not-a-uuid", "Prompt"),
            Err(AppError::NotFound(msg)) if msg == "Prompt not found"
        ));
    }
}
