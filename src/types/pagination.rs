//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination query parameters, reusable across all list endpoints
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// 1-indexed page number
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (capped at the server maximum)
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.limit()
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Zero-indexed page for paginator APIs
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper, reusable for all list responses
#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, page: u64, size: u64, total: u64) -> Self {
        let total_pages = if size > 0 { total.div_ceil(size) } else { 0 };

        Self {
            data,
            meta: PaginationMeta {
                page,
                size,
                total,
                total_pages,
            },
        }
    }

    /// An empty page with zero total, for scopes that resolve to nothing
    pub fn empty(page: u64, size: u64) -> Self {
        Self::new(Vec::new(), page, size, 0)
    }

    /// Map the items while keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_capped_at_maximum() {
        let params = PaginationParams {
            page: 1,
            size: 10_000,
        };
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn offset_is_zero_for_first_page() {
        let params = PaginationParams { page: 1, size: 50 };
        assert_eq!(params.offset(), 0);
        let params = PaginationParams { page: 3, size: 50 };
        assert_eq!(params.offset(), 100);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Paginated::new(vec![1, 2, 3], 1, 2, 3);
        assert_eq!(page.meta.total_pages, 2);
    }

    #[test]
    fn map_transforms_items_and_keeps_meta() {
        let page = Paginated::new(vec![1, 2], 2, 10, 12).map(|n| n.to_string());
        assert_eq!(page.data, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.total, 12);
    }
}
