use serde::Deserialize;
use utoipa::ToSchema;

/// Catalog listing query. Everything arrives as raw strings and is
/// normalized leniently: bad `page`/`limit`/`sort` values fall back to their
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub shop_id: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 18;

impl ProductQuery {
    /// Returns `(page, limit, offset)`. Non-positive or non-numeric values
    /// are ignored and the defaults used. The offset saturates: the lenient
    /// parser accepts any positive `i64`, so `(page - 1) * limit` must not
    /// overflow on absurd-but-valid page numbers.
    pub fn pagination(&self) -> (i64, i64, i64) {
        let page = parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT);
        let offset = page.saturating_sub(1).saturating_mul(limit);
        (page, limit, offset)
    }

    pub fn sort_key(&self) -> SortKey {
        SortKey::from_param(self.sort.as_deref())
    }
}

fn parse_positive(value: Option<&str>) -> Option<i64> {
    value.and_then(|s| s.parse::<i64>().ok()).filter(|&n| n > 0)
}

/// Closed sort vocabulary. Anything outside it is the featured order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Default: id ascending.
    Featured,
    PriceLow,
    PriceHigh,
    Name,
    Newest,
}

impl SortKey {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("priceLow") => Self::PriceLow,
            Some("priceHigh") => Self::PriceHigh,
            Some("name") => Self::Name,
            Some("newest") => Self::Newest,
            _ => Self::Featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> ProductQuery {
        ProductQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            ..ProductQuery::default()
        }
    }

    #[test]
    fn pagination_defaults() {
        assert_eq!(query(None, None).pagination(), (1, 18, 0));
    }

    #[test]
    fn pagination_offset() {
        assert_eq!(query(Some("3"), Some("10")).pagination(), (3, 10, 20));
    }

    #[test]
    fn invalid_page_and_limit_fall_back_to_defaults() {
        assert_eq!(query(Some("abc"), Some("0")).pagination(), (1, 18, 0));
        assert_eq!(query(Some("-2"), Some("x")).pagination(), (1, 18, 0));
    }

    #[test]
    fn huge_page_saturates_instead_of_overflowing() {
        let (page, limit, offset) = query(Some("9223372036854775807"), Some("2")).pagination();
        assert_eq!(page, i64::MAX);
        assert_eq!(limit, 2);
        assert_eq!(offset, i64::MAX);
        assert!(offset >= 0);
    }

    #[test]
    fn unknown_sort_is_featured() {
        assert_eq!(SortKey::from_param(None), SortKey::Featured);
        assert_eq!(SortKey::from_param(Some("bogus")), SortKey::Featured);
        assert_eq!(SortKey::from_param(Some("priceLow")), SortKey::PriceLow);
        assert_eq!(SortKey::from_param(Some("priceHigh")), SortKey::PriceHigh);
        assert_eq!(SortKey::from_param(Some("name")), SortKey::Name);
        assert_eq!(SortKey::from_param(Some("newest")), SortKey::Newest);
    }
}
