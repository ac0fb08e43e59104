//! Shared application state for Axum handlers.
//!
//! The state bundles the product store and the runtime configuration.
//! Handlers receive it through `State<AppState>` instead of reaching for a
//! process-wide global, which keeps ownership explicit and lets tests build
//! an isolated store per router.
//!
//! # Thread Safety
//!
//! All components are wrapped in `Arc` (the store internally) so cloning the
//! state for each request is cheap and safe across worker threads.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::query::PageLimits;
use crate::store::ProductStore;

/// Shared application state for Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// In-memory product collection
    pub store: ProductStore,
    /// Timestamp when the application started
    pub started_at: Instant,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create state with a store seeded according to `config.seed_products`.
    pub fn new(config: Config) -> Self {
        let store = if config.seed_products {
            ProductStore::seeded()
        } else {
            ProductStore::default()
        };
        Self::with_store(store, config)
    }

    /// Create state around an existing store.
    pub fn with_store(store: ProductStore, config: Config) -> Self {
        Self {
            store,
            started_at: Instant::now(),
            config: Arc::new(config),
        }
    }

    /// Page size bounds for listings.
    pub fn page_limits(&self) -> PageLimits {
        self.config.page_limits()
    }

    /// Get the application uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
