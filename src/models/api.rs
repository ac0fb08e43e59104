use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// Request body for creating or replacing a product.
///
/// Every field is optional at the deserialization layer so that a missing
/// field produces a validation error naming it, rather than a serde error.
/// `null` is treated the same as absent.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    /// Must be present explicitly; `false` is a valid value
    #[serde(default)]
    pub in_stock: Option<bool>,
}

/// Query parameters for listing products.
///
/// `page` and `limit` are kept as raw strings: a non-numeric value falls
/// back to the default instead of rejecting the request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive exact match on category
    pub category: Option<String>,
    /// Case-insensitive substring match on name
    pub search: Option<String>,
    /// 1-based page number (default: 1)
    pub page: Option<String>,
    /// Page size (default: configured `DEFAULT_PAGE_LIMIT`)
    pub limit: Option<String>,
}

/// Response after replacing a product.
#[derive(Debug, Serialize)]
pub struct UpdateProductResponse {
    pub message: String,
    pub product: Product,
}

/// Response after removing a product.
#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub message: String,
    pub deleted: Product,
}

/// Catalog statistics over the unfiltered collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Number of products in the catalog
    pub total: usize,
    /// Product count per lowercased category
    pub by_category: BTreeMap<String, usize>,
}

impl StatsResponse {
    /// Aggregate counts from a slice of products.
    pub fn from_products(products: &[Product]) -> Self {
        let mut by_category = BTreeMap::new();
        for product in products {
            *by_category.entry(product.category_key()).or_insert(0) += 1;
        }

        Self {
            total: products.len(),
            by_category,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service health status
    pub status: String,
    /// Service version
    pub version: String,
    /// Products currently held in memory
    pub product_count: usize,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Current timestamp
    pub timestamp: DateTime<Utc>,
}
