//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (outermost first)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │   Catch Panic    │ ← any handler panic becomes the uniform 500 body
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │   Request ID     │ ← Adds X-Request-Id header
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │   Entry Trace    │ ← arrival/completion log + metrics
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │  Tracing / CORS  │ ← HTTP spans, cross-origin headers
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │  API Key Guard   │ ← 401 on POST/PUT/DELETE without a valid key
//! └────────┬─────────┘  (product routes only)
//!          ▼
//!      Handler
//! ```
//!
//! # Route Groups
//!
//! - `/`, `/health` - Greeting and liveness
//! - `/api/products` - Catalog (reads open, writes guarded)
//! - `/error-test` - Diagnostic route that always fails

use std::any::Any;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::handlers;
use crate::middleware::{ApiKeyAuth, RequestIdLayer, trace_requests};
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns `AppError::ConfigError` if the API key header name is invalid.
pub fn build_router(state: AppState) -> AppResult<Router> {
    let config = &state.config;

    let auth_layer = ApiKeyAuth::new(config.api_key.clone(), config.api_key_header_name()?);
    if auth_layer.is_enabled() {
        info!(header = %config.api_key_header, "API key authentication enabled for product writes");
    } else {
        warn!("No API_KEY set: create, update and delete requests will be rejected");
    }

    // Guarded only where it is route-layered, so unknown paths still 404
    let products = Router::new()
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/api/products/stats",
            get(handlers::product_stats)
                .put(handlers::stats_is_not_a_product)
                .delete(handlers::stats_is_not_a_product),
        )
        .route(
            "/api/products/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .route_layer(auth_layer);

    let router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/error-test", get(handlers::error_test))
        .merge(products)
        .fallback(handlers::not_found);

    let router = with_middleware(router, config);
    Ok(router.with_state(state))
}

/// Wrap routes in the shared middleware stack.
fn with_middleware(mut router: Router<AppState>, config: &Config) -> Router<AppState> {
    // =========================================================================
    // Apply Middleware Stack (order matters - applied bottom to top)
    // =========================================================================

    // 1. Request body size limit
    info!(
        max_bytes = config.max_request_body_size,
        "Request body size limit configured"
    );
    router = router.layer(DefaultBodyLimit::max(config.max_request_body_size));

    // 2. CORS
    router = router.layer(build_cors_layer(&config.cors_allowed_origins));

    // 3. Tracing
    router = router.layer(TraceLayer::new_for_http());

    // 4. Entry trace (needs the request id, so sits inside it)
    router = router.layer(axum::middleware::from_fn(trace_requests));

    // 5. Request ID
    router = router.layer(RequestIdLayer::new());

    // 6. Panic boundary - outermost, nothing escapes as a dropped connection
    router.layer(CatchPanicLayer::custom(handle_panic))
}

/// Turn a handler panic into the uniform internal error response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("Handler panicked: {detail}")).into_response()
}

/// Build CORS layer from configuration.
///
/// `*` allows any origin; otherwise only the listed origins are allowed.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_any = allowed_origins.iter().any(|o| o == "*");

    if allow_any {
        CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin)
    }
}
