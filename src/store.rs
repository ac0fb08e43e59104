//! In-memory product store.
//!
//! The store owns the authoritative, ordered list of products for the
//! lifetime of the process. It is cheap to clone (an `Arc` around the list)
//! and is handed to handlers through [`AppState`](crate::state::AppState).
//!
//! # Consistency
//!
//! Every operation takes the lock once and finishes its whole
//! read-modify-write under that guard. A find-then-replace or
//! find-then-remove is therefore never observed half-done by another
//! request, even on the multi-threaded runtime.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{Product, ProductFields, StatsResponse, seed_products};

/// Shared, ordered collection of products.
#[derive(Clone, Default)]
pub struct ProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl ProductStore {
    /// Create a store holding the given products in order.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Create a store holding the three seed products.
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    /// Ordered copy of every product.
    pub async fn snapshot(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    /// Look up a product by id.
    pub async fn get(&self, id: &str) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Append a product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Conflict` if a product with the same id exists.
    pub async fn insert(&self, product: Product) -> AppResult<Product> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id == product.id) {
            return Err(AppError::Conflict(format!(
                "Product with id '{}' already exists",
                product.id
            )));
        }

        products.push(product.clone());
        debug!(id = %product.id, total = products.len(), "Product inserted");
        Ok(product)
    }

    /// Replace every field except `id` of the product with the given id.
    ///
    /// Returns the updated product, or `None` if no product has that id.
    pub async fn replace(&self, id: &str, fields: ProductFields) -> Option<Product> {
        let mut products = self.products.write().await;
        let product = products.iter_mut().find(|p| p.id == id)?;
        product.apply(fields);
        debug!(id, "Product replaced");
        Some(product.clone())
    }

    /// Remove the product with the given id, returning it.
    pub async fn remove(&self, id: &str) -> Option<Product> {
        let mut products = self.products.write().await;
        let index = products.iter().position(|p| p.id == id)?;
        let removed = products.remove(index);
        debug!(id, total = products.len(), "Product removed");
        Some(removed)
    }

    /// Total count and per-category counts over the whole collection.
    pub async fn stats(&self) -> StatsResponse {
        StatsResponse::from_products(&self.products.read().await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn fields(name: &str) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            description: "desc".to_string(),
            price: Decimal::from(10),
            category: "misc".to_string(),
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_seeded_store_order() {
        let store = ProductStore::seeded();
        let names: Vec<_> = store
            .snapshot()
            .await
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["Laptop", "Smartphone", "Coffee Maker"]);
    }

    #[tokio::test]
    async fn test_default_store_is_empty() {
        let store = ProductStore::default();
        assert!(store.is_empty().await);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_insert_appends() {
        let store = ProductStore::seeded();
        store
            .insert(Product::from_fields("42", fields("Kettle")))
            .await
            .unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.last().unwrap().id, "42");
    }

    #[tokio::test]
    async fn test_insert_duplicate_id_rejected() {
        let store = ProductStore::seeded();
        let result = store.insert(Product::from_fields("1", fields("Dup"))).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_replace_existing() {
        let store = ProductStore::seeded();
        let updated = store.replace("2", fields("Tablet")).await.unwrap();

        assert_eq!(updated.id, "2");
        assert_eq!(updated.name, "Tablet");
        assert_eq!(store.get("2").await.unwrap().name, "Tablet");
        // Position is kept
        assert_eq!(store.snapshot().await[1].id, "2");
    }

    #[tokio::test]
    async fn test_replace_missing_leaves_store_unchanged() {
        let store = ProductStore::seeded();
        let before = store.snapshot().await;

        assert!(store.replace("nope", fields("Ghost")).await.is_none());
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = ProductStore::seeded();
        let removed = store.remove("1").await.unwrap();

        assert_eq!(removed.name, "Laptop");
        assert_eq!(store.len().await, 2);
        assert!(store.get("1").await.is_none());
        assert!(store.remove("1").await.is_none());
    }

    #[tokio::test]
    async fn test_stats() {
        let store = ProductStore::seeded();
        let stats = store.stats().await;

        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_category.get("electronics"), Some(&2));
        assert_eq!(stats.by_category.get("kitchen"), Some(&1));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_keep_ids_unique() {
        let store = ProductStore::default();
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert(Product::from_fields(i.to_string(), fields("p")))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.len().await, 32);
    }
}
