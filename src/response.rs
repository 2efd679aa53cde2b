use serde::Serialize;
use utoipa::ToSchema;

/// Catalog paging block: `{totalProducts, totalPages, currentPage, limit}`.
#[derive(Debug, Serialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_products: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub limit: i64,
}

impl PageInfo {
    /// `page` is echoed back as requested, even past the last page; only the
    /// page count itself is derived from the filtered total.
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total - 1) / limit + 1
        };
        Self {
            total_products: total,
            total_pages,
            current_page: page,
            limit,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(PageInfo::new(5, 2, 2).total_pages, 3);
        assert_eq!(PageInfo::new(6, 1, 2).total_pages, 3);
        assert_eq!(PageInfo::new(0, 1, 18).total_pages, 0);
        assert_eq!(PageInfo::new(1, 1, 18).total_pages, 1);
    }

    #[test]
    fn requested_page_is_echoed_even_past_the_end() {
        let info = PageInfo::new(5, 9, 2);
        assert_eq!(info.current_page, 9);
        assert_eq!(info.total_pages, 3);
    }
}
