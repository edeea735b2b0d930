//! Utility module - response envelope, errors, logging, time helpers

pub mod error;
pub mod logger;
pub mod time;

pub use error::AppError;

use serde::Serialize;

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;

/// Standard API response envelope
///
/// ```json
/// { "success": true, "data": ..., "pagination": {...}, "message": "..." }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> AppResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            message: None,
        }
    }

    pub fn with_pagination(data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: Some(pagination),
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            message: Some(message.into()),
        }
    }
}

/// Pagination metadata for list responses
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_orders: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Derive metadata from the executed page.
    ///
    /// `has_next` compares `skip + fetched` against the total, so a short
    /// final page reports no further pages even when `total_pages` rounds up.
    pub fn compute(page: u32, limit: u32, fetched: usize, total: i64) -> Self {
        let skip = (page as i64 - 1) * limit as i64;
        let total_pages = if total == 0 {
            0
        } else {
            ((total + limit as i64 - 1) / limit as i64) as u32
        };
        Self {
            current_page: page,
            total_pages,
            total_orders: total,
            has_next: (skip + fetched as i64) < total,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_first_of_three_pages() {
        let p = Pagination::compute(1, 10, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn pagination_last_short_page() {
        let p = Pagination::compute(3, 10, 5, 25);
        assert!(!p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn pagination_empty_result() {
        let p = Pagination::compute(1, 10, 0, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }
}
