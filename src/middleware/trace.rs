//! Entry trace middleware.
//!
//! Logs every request on arrival (method, path, request id, arrival time)
//! and again on completion (status, latency), and feeds the request
//! metrics. It only observes: the request and response pass through
//! untouched and the middleware itself cannot fail.
//!
//! # Usage
//!
//! ```rust,ignore
//! router.layer(axum::middleware::from_fn(trace_requests))
//! ```

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use tracing::{info, warn};

use super::request_id::RequestIdExt;
use crate::metrics;

/// Record arrival and completion of a request.
pub async fn trace_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let arrived_at = Utc::now().to_rfc3339();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request.request_id().unwrap_or_default();

    info!(
        %method,
        %path,
        %request_id,
        %arrived_at,
        "Request received"
    );

    let response = next.run(request).await;

    let status = response.status();
    let elapsed = started.elapsed();
    let latency_ms = elapsed.as_secs_f64() * 1000.0;

    if status.is_server_error() {
        warn!(%method, %path, %request_id, status = status.as_u16(), latency_ms, "Request failed");
    } else {
        info!(%method, %path, %request_id, status = status.as_u16(), latency_ms, "Request completed");
    }

    metrics::record_request(method.as_str(), status.as_u16(), elapsed.as_secs_f64());

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_trace_passes_response_through() {
        let app = Router::new()
            .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
            .layer(axum::middleware::from_fn(trace_requests));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/teapot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"short and stout");
    }
}
