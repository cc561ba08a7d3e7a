//! Paging query parameters and response metadata.

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: i64 = 5;
const MAX_PAGE_SIZE: i64 = 100;

/// `page` / `pageSize` query parameters shared by list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

impl PageQuery {
    /// Clamp to sane bounds: page >= 1, 1 <= pageSize <= 100.
    pub fn normalize(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, page_size)
    }
}

/// Paging metadata attached to list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: i64,
    pub page_size: i64,
    pub total_records: i64,
    pub total_pages: i64,
}

impl PageInfo {
    pub fn new(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records == 0 {
            return Self::default();
        }
        Self {
            current_page: page,
            page_size,
            total_records,
            total_pages: (total_records + page_size - 1) / page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_applies_defaults_and_bounds() {
        let query = PageQuery::default();
        assert_eq!(query.normalize(), (1, DEFAULT_PAGE_SIZE));

        let query = PageQuery {
            page: Some(0),
            page_size: Some(1000),
        };
        assert_eq!(query.normalize(), (1, MAX_PAGE_SIZE));
    }

    #[test]
    fn page_info_rounds_total_pages_up() {
        let info = PageInfo::new(11, 2, 5);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.current_page, 2);
    }

    #[test]
    fn page_info_is_zeroed_when_empty() {
        assert_eq!(PageInfo::new(0, 3, 5), PageInfo::default());
    }
}
