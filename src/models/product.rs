use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product record held in the catalog.
///
/// # Monetary Values
///
/// `price` uses `rust_decimal::Decimal` to keep exact decimal arithmetic,
/// but is serialized as a plain JSON number so clients see `"price": 1200`
/// rather than a quoted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier, never changes after creation
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Compared case-insensitively when filtering and aggregating
    pub category: String,
    pub in_stock: bool,
}

/// Every product field except `id`.
///
/// This is the validated replacement shape produced from a request payload;
/// both create and update go through it, so an update can never leave a
/// product with missing fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    /// Build a product from an identifier and validated fields.
    pub fn from_fields(id: impl Into<String>, fields: ProductFields) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            in_stock: fields.in_stock,
        }
    }

    /// Replace every field except `id`.
    pub fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.category = fields.category;
        self.in_stock = fields.in_stock;
    }

    /// Lowercased category, used as the aggregation and filter key.
    pub fn category_key(&self) -> String {
        self.category.to_lowercase()
    }
}

/// The fixed catalog the service starts with.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Laptop".to_string(),
            description: "High-performance laptop with 16GB RAM".to_string(),
            price: Decimal::from(1200),
            category: "electronics".to_string(),
            in_stock: true,
        },
        Product {
            id: "2".to_string(),
            name: "Smartphone".to_string(),
            description: "Latest model with 128GB storage".to_string(),
            price: Decimal::from(800),
            category: "electronics".to_string(),
            in_stock: true,
        },
        Product {
            id: "3".to_string(),
            name: "Coffee Maker".to_string(),
            description: "Programmable coffee maker with timer".to_string(),
            price: Decimal::from(50),
            category: "kitchen".to_string(),
            in_stock: false,
        },
    ]
}
