//! Prometheus metrics for application observability.
//!
//! Metrics are exposed via a dedicated HTTP listener when `METRICS_PORT` is
//! non-zero. When the exporter is not installed the recording functions are
//! no-ops, so handlers and tests can call them unconditionally.
//!
//! # Available Metrics
//!
//! ## Counters
//! - `catalog_http_requests_total` - Requests served (labels: method, status)
//! - `catalog_products_created_total` - Products created
//! - `catalog_products_updated_total` - Products replaced
//! - `catalog_products_deleted_total` - Products deleted
//! - `catalog_auth_failures_total` - Rejected credentials (label: reason)
//!
//! ## Histograms
//! - `catalog_http_request_duration_seconds` - Request duration (label: method)
//!
//! ## Gauges
//! - `catalog_products` - Products currently held in memory

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{error, info};

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "catalog_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "catalog_http_request_duration_seconds";
    pub const PRODUCTS_CREATED_TOTAL: &str = "catalog_products_created_total";
    pub const PRODUCTS_UPDATED_TOTAL: &str = "catalog_products_updated_total";
    pub const PRODUCTS_DELETED_TOTAL: &str = "catalog_products_deleted_total";
    pub const AUTH_FAILURES_TOTAL: &str = "catalog_auth_failures_total";
    pub const PRODUCTS: &str = "catalog_products";
}

/// Initialize the Prometheus metrics exporter.
///
/// Installs the global recorder, starts the HTTP listener on `metrics_addr`
/// and registers descriptions for every metric.
pub fn init_metrics(metrics_addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))?;

    describe_counter!(names::HTTP_REQUESTS_TOTAL, "Total number of HTTP requests");
    describe_counter!(
        names::PRODUCTS_CREATED_TOTAL,
        "Total number of products created"
    );
    describe_counter!(
        names::PRODUCTS_UPDATED_TOTAL,
        "Total number of products replaced"
    );
    describe_counter!(
        names::PRODUCTS_DELETED_TOTAL,
        "Total number of products deleted"
    );
    describe_counter!(
        names::AUTH_FAILURES_TOTAL,
        "Total number of requests rejected by the API key check"
    );
    describe_histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        "HTTP request duration in seconds"
    );
    describe_gauge!(names::PRODUCTS, "Products currently held in memory");

    info!(addr = %metrics_addr, "Prometheus metrics endpoint started");
    Ok(())
}

/// Try to initialize metrics, logging any errors but not failing.
pub fn try_init_metrics(metrics_addr: SocketAddr) {
    if let Err(e) = init_metrics(metrics_addr) {
        error!(error = %e, "Failed to initialize metrics, continuing without metrics");
    }
}

/// Record a completed HTTP request.
pub fn record_request(method: &str, status: u16, duration_secs: f64) {
    counter!(names::HTTP_REQUESTS_TOTAL, "method" => method.to_string(), "status" => status.to_string())
        .increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, "method" => method.to_string())
        .record(duration_secs);
}

pub fn record_product_created() {
    counter!(names::PRODUCTS_CREATED_TOTAL).increment(1);
}

pub fn record_product_updated() {
    counter!(names::PRODUCTS_UPDATED_TOTAL).increment(1);
}

pub fn record_product_deleted() {
    counter!(names::PRODUCTS_DELETED_TOTAL).increment(1);
}

/// Record a rejected credential (`missing`, `invalid` or `not_configured`).
pub fn record_auth_failure(reason: &'static str) {
    counter!(names::AUTH_FAILURES_TOTAL, "reason" => reason).increment(1);
}

/// Update the product count gauge.
pub fn set_product_count(count: usize) {
    gauge!(names::PRODUCTS).set(count as f64);
}
