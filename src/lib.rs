//! # Product Catalog Service
//!
//! A small HTTP service exposing CRUD operations over an in-memory product
//! catalog, with writes guarded by a shared API key:
//!
//! - **Catalog**: list with category/name filters and pagination, stats
//! - **Security**: constant-time API key check on create/update/delete
//! - **Observability**: request IDs, structured logging, optional Prometheus
//! - **Error boundary**: every failure, panics included, answers with the
//!   same JSON error shape
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Middleware (Catch Panic → Request ID → Entry Trace → CORS) │
//! ├─────────────────────────────────────────────────────────────┤
//! │  API Key Guard (product writes only)                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Handlers (products, health, diagnostics)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Query filter/paginate  │  ProductStore (Arc<RwLock<Vec>>)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use product_catalog::{AppState, Config, build_router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let state = AppState::new(config);
//!     let app = build_router(state)?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Security Configuration
//!
//! ```bash
//! API_KEY=your-secret-key cargo run
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod query;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use error::{AppError, AppResult};
pub use routes::build_router;
pub use state::AppState;
pub use store::ProductStore;
