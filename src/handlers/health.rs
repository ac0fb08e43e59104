//! Root greeting and health endpoints.
//!
//! - `GET /` - Plain text greeting
//! - `GET /health` - Liveness with basic catalog details

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use tracing::instrument;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Plain text greeting.
pub async fn root() -> &'static str {
    "Hello World"
}

/// Health check endpoint.
///
/// Always returns 200 OK while the process is serving.
///
/// # Response Body
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "productCount": 3,
///   "uptimeSeconds": 42,
///   "timestamp": "2024-01-15T10:30:00Z"
/// }
/// ```
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        product_count: state.store.len().await,
        uptime_seconds: state.uptime_seconds(),
        timestamp: Utc::now(),
    })
}
