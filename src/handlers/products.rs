//! Product CRUD and statistics handlers.
//!
//! # Endpoints
//!
//! - `GET /api/products` - List with `category`, `search`, `page`, `limit`
//! - `GET /api/products/stats` - Total and per-category counts
//! - `POST /api/products` - Create (API key required)
//! - `PUT /api/products/{id}` - Replace all fields but `id` (API key required)
//! - `DELETE /api/products/{id}` - Remove (API key required)
//!
//! Create and update share one validated payload shape, so an update can
//! never write a partial product.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::metrics;
use crate::models::{
    DeleteProductResponse, Product, ProductPayload, ProductQuery, StatsResponse,
    UpdateProductResponse,
};
use crate::query::filter_and_paginate;
use crate::state::AppState;
use crate::validation::validate_product_payload;

const PRODUCT_NOT_FOUND: &str = "Product not found";

/// List products, filtered and paginated.
///
/// Always succeeds; no match yields an empty array.
///
/// # Query Parameters
///
/// - `category` - case-insensitive exact match
/// - `search` - case-insensitive substring of the name
/// - `page` - 1-based page (default: 1)
/// - `limit` - page size (default: `DEFAULT_PAGE_LIMIT`)
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<Product>> {
    let snapshot = state.store.snapshot().await;
    Json(filter_and_paginate(snapshot, &query, state.page_limits()))
}

/// Total product count and count per lowercased category.
///
/// # Response Body
///
/// ```json
/// { "total": 3, "byCategory": { "electronics": 2, "kitchen": 1 } }
/// ```
#[instrument(skip(state))]
pub async fn product_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.store.stats().await)
}

/// Create a product with a freshly generated id.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Kettle",
///   "description": "Electric kettle",
///   "price": 35,
///   "category": "kitchen",
///   "inStock": true
/// }
/// ```
///
/// Responds `201 Created` with the stored product, or `400` naming every
/// missing field.
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let Json(payload) = payload?;
    let fields = validate_product_payload(payload)?;

    let product = state
        .store
        .insert(Product::from_fields(Uuid::new_v4().to_string(), fields))
        .await?;

    metrics::record_product_created();
    metrics::set_product_count(state.store.len().await);
    info!(id = %product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace every field of a product except its id.
///
/// Any id the store does not hold, however malformed, is reported as `404`
/// before the body is validated.
#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<Json<UpdateProductResponse>> {
    if state.store.get(&id).await.is_none() {
        return Err(AppError::NotFound(PRODUCT_NOT_FOUND.to_string()));
    }

    let Json(payload) = payload?;
    let fields = validate_product_payload(payload)?;

    // The product may have been deleted between the lookup and here
    let product = state
        .store
        .replace(&id, fields)
        .await
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

    metrics::record_product_updated();
    info!(id = %product.id, "Product updated");

    Ok(Json(UpdateProductResponse {
        message: "Product updated successfully".to_string(),
        product,
    }))
}

/// Update or delete aimed at `/api/products/stats`.
///
/// The stats route owns that path, but no product can carry `stats` as
/// its id, so writes there are answered like any other unknown id.
#[instrument]
pub async fn stats_is_not_a_product() -> AppError {
    AppError::NotFound(PRODUCT_NOT_FOUND.to_string())
}

/// Remove a product, returning what was removed.
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteProductResponse>> {
    let deleted = state
        .store
        .remove(&id)
        .await
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

    metrics::record_product_deleted();
    metrics::set_product_count(state.store.len().await);
    info!(id = %deleted.id, "Product deleted");

    Ok(Json(DeleteProductResponse {
        message: "Product deleted successfully".to_string(),
        deleted,
    }))
}
