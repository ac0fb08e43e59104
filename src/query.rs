//! Filtering, search and pagination for product listings.
//!
//! These are pure functions over a product snapshot; the list handler
//! feeds them the store snapshot and the raw query string values.
//!
//! # Semantics
//!
//! - `category`: case-insensitive exact match
//! - `search`: case-insensitive substring match on `name`
//! - both filters combine with AND; an empty value means "no filter"
//! - `page` and `limit` fall back to their defaults when missing or
//!   non-numeric; `limit` is capped only when a maximum is configured
//! - a numeric page or limit below 1, or a page past the end, yields an
//!   empty result, never an error

use crate::models::{Product, ProductQuery};

/// Default page number when `page` is absent or invalid.
pub const DEFAULT_PAGE: usize = 1;

/// Page size bounds taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Page size used when `limit` is absent or invalid
    pub default_limit: usize,
    /// Largest page size a client may request, unbounded when `None`
    pub max_limit: Option<usize>,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: None,
        }
    }
}

/// Resolved pagination window.
///
/// A `page` or `limit` of zero stands for a numeric value below 1 and
/// selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Pagination {
    /// Resolve `page` and `limit` from raw query values.
    pub fn resolve(page: Option<&str>, limit: Option<&str>, limits: PageLimits) -> Self {
        let page = parse_count(page).unwrap_or(DEFAULT_PAGE);
        let limit = parse_count(limit).unwrap_or(limits.default_limit);
        let limit = limits.max_limit.map_or(limit, |max| limit.min(max));

        Self { page, limit }
    }

    /// Whether the window selects nothing regardless of the data.
    pub fn is_empty(&self) -> bool {
        self.page == 0 || self.limit == 0
    }

    /// Number of matching items skipped before this page starts.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Number of items this page may hold.
    pub fn size(&self) -> usize {
        if self.is_empty() { 0 } else { self.limit }
    }
}

/// Parse an integer query value, ignoring surrounding whitespace.
///
/// Negative integers resolve to zero, positive integers too large for
/// `usize` saturate, and anything else is `None`.
fn parse_count(raw: Option<&str>) -> Option<usize> {
    let value = raw?.trim();
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if negative {
        return Some(0);
    }

    Some(digits.parse::<usize>().unwrap_or(usize::MAX))
}

/// Lowercased, non-empty filter value.
fn normalized(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

/// Compiled category and name filters.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    category: Option<String>,
    search: Option<String>,
}

impl ProductFilter {
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        Self {
            category: normalized(category),
            search: normalized(search),
        }
    }

    /// Whether a product passes every active filter.
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|c| product.category.to_lowercase() == *c);
        let search_ok = self
            .search
            .as_ref()
            .is_none_or(|s| product.name.to_lowercase().contains(s.as_str()));

        category_ok && search_ok
    }
}

/// Apply filters and pagination to a product snapshot, keeping order.
pub fn filter_and_paginate(
    products: Vec<Product>,
    query: &ProductQuery,
    limits: PageLimits,
) -> Vec<Product> {
    let filter = ProductFilter::new(query.category.as_deref(), query.search.as_deref());
    let pagination = Pagination::resolve(query.page.as_deref(), query.limit.as_deref(), limits);

    products
        .into_iter()
        .filter(|p| filter.matches(p))
        .skip(pagination.offset())
        .take(pagination.size())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::seed_products;

    fn query(pairs: &[(&str, &str)]) -> ProductQuery {
        let mut q = ProductQuery::default();
        for (key, value) in pairs {
            let value = Some((*value).to_string());
            match *key {
                "category" => q.category = value,
                "search" => q.search = value,
                "page" => q.page = value,
                "limit" => q.limit = value,
                _ => panic!("unknown query key {key}"),
            }
        }
        q
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_all_in_order() {
        let result = filter_and_paginate(seed_products(), &query(&[]), PageLimits::default());
        assert_eq!(ids(&result), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_category_filter_case_insensitive() {
        let result = filter_and_paginate(
            seed_products(),
            &query(&[("category", "ELECTRONICS")]),
            PageLimits::default(),
        );
        assert_eq!(ids(&result), vec!["1", "2"]);
    }

    #[test]
    fn test_category_filter_is_exact_match() {
        let result = filter_and_paginate(
            seed_products(),
            &query(&[("category", "electro")]),
            PageLimits::default(),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_search_substring_case_insensitive() {
        let result = filter_and_paginate(
            seed_products(),
            &query(&[("search", "lap")]),
            PageLimits::default(),
        );
        assert_eq!(ids(&result), vec!["1"]);

        let result = filter_and_paginate(
            seed_products(),
            &query(&[("search", "MAKER")]),
            PageLimits::default(),
        );
        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let result = filter_and_paginate(
            seed_products(),
            &query(&[("category", "kitchen"), ("search", "phone")]),
            PageLimits::default(),
        );
        assert!(result.is_empty());

        let result = filter_and_paginate(
            seed_products(),
            &query(&[("category", "electronics"), ("search", "phone")]),
            PageLimits::default(),
        );
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_empty_filter_values_are_ignored() {
        let result = filter_and_paginate(
            seed_products(),
            &query(&[("category", ""), ("search", "  ")]),
            PageLimits::default(),
        );
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_pagination_windows() {
        let first = filter_and_paginate(
            seed_products(),
            &query(&[("page", "1"), ("limit", "2")]),
            PageLimits::default(),
        );
        assert_eq!(ids(&first), vec!["1", "2"]);

        let second = filter_and_paginate(
            seed_products(),
            &query(&[("page", "2"), ("limit", "2")]),
            PageLimits::default(),
        );
        assert_eq!(ids(&second), vec!["3"]);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let result = filter_and_paginate(
            seed_products(),
            &query(&[("page", "5"), ("limit", "2")]),
            PageLimits::default(),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_or_non_numeric_values_fall_back_to_defaults() {
        let limits = PageLimits::default();
        let defaults = Pagination {
            page: 1,
            limit: 10,
        };

        assert_eq!(Pagination::resolve(None, None, limits), defaults);
        assert_eq!(Pagination::resolve(Some("abc"), Some("ten"), limits), defaults);
        assert_eq!(Pagination::resolve(Some(""), Some("2.5"), limits), defaults);
        assert_eq!(Pagination::resolve(Some("-"), Some("+"), limits), defaults);
    }

    #[test]
    fn test_numeric_values_below_one_select_nothing() {
        let limits = PageLimits::default();

        for (page, limit) in [("0", "2"), ("-1", "2"), ("1", "0"), ("1", "-3")] {
            assert!(Pagination::resolve(Some(page), Some(limit), limits).is_empty());

            let result = filter_and_paginate(
                seed_products(),
                &query(&[("page", page), ("limit", limit)]),
                limits,
            );
            assert!(result.is_empty(), "page={page} limit={limit}");
        }
    }

    #[test]
    fn test_limit_is_unbounded_by_default() {
        let many: Vec<Product> = (0..150)
            .map(|i| {
                let mut product = seed_products().remove(0);
                product.id = i.to_string();
                product
            })
            .collect();

        let result = filter_and_paginate(many, &query(&[("limit", "500")]), PageLimits::default());
        assert_eq!(result.len(), 150);
    }

    #[test]
    fn test_limit_is_capped_when_configured() {
        let limits = PageLimits {
            default_limit: 10,
            max_limit: Some(50),
        };
        assert_eq!(Pagination::resolve(None, Some("1000"), limits).limit, 50);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let huge = usize::MAX.to_string();
        let pagination = Pagination::resolve(Some(huge.as_str()), Some("100"), PageLimits::default());
        assert_eq!(pagination.offset(), usize::MAX);

        let result = filter_and_paginate(
            seed_products(),
            &query(&[("page", huge.as_str()), ("limit", "100")]),
            PageLimits::default(),
        );
        assert!(result.is_empty());
    }
}
