//! API key guard for mutating product routes.
//!
//! # Security Features
//!
//! - **Constant-time comparison**: Prevents timing attacks on API key validation
//! - **Header only**: The key is read from `X-API-Key` (name configurable),
//!   never from the query string, so it does not end up in access logs
//! - **Method based**: Safe methods (GET, HEAD, OPTIONS) pass through; every
//!   other method on a guarded route needs the key
//! - **Fails closed**: With no `API_KEY` configured, guarded requests are
//!   rejected instead of silently allowed
//!
//! # Usage
//!
//! ```bash
//! API_KEY=your-secret-key cargo run
//!
//! curl -X POST -H "X-API-Key: your-secret-key" \
//!      -H "Content-Type: application/json" \
//!      -d '{"name":"Kettle","description":"Electric","price":35,"category":"kitchen","inStock":true}' \
//!      http://localhost:3000/api/products
//! ```
//!
//! A rejected request never reaches the handler, so the store is untouched.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{HeaderName, Method, Request, Response};
use axum::response::IntoResponse;
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::metrics;

/// Default header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// API key authentication layer.
///
/// Apply it with `route_layer` on the routes it guards so unmatched paths
/// still fall through to the 404 fallback.
#[derive(Clone)]
pub struct ApiKeyAuth {
    /// Expected API key (None = every guarded request is rejected)
    expected_key: Option<Arc<String>>,
    /// Header the key is read from
    header: HeaderName,
}

impl ApiKeyAuth {
    /// Create a new API key auth layer.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Expected API key; `None` rejects all guarded requests
    /// * `header` - Header the key is read from
    pub fn new(api_key: Option<String>, header: HeaderName) -> Self {
        Self {
            expected_key: api_key.map(Arc::new),
            header,
        }
    }

    /// Check if an API key is configured.
    pub fn is_enabled(&self) -> bool {
        self.expected_key.is_some()
    }
}

impl<S> Layer<S> for ApiKeyAuth {
    type Service = ApiKeyAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyAuthService {
            inner,
            expected_key: self.expected_key.clone(),
            header: self.header.clone(),
        }
    }
}

/// API key authentication service wrapper.
#[derive(Clone)]
pub struct ApiKeyAuthService<S> {
    inner: S,
    expected_key: Option<Arc<String>>,
    header: HeaderName,
}

impl<S> Service<Request<Body>> for ApiKeyAuthService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let verdict = check_request(&req, self.expected_key.as_deref(), &self.header);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match verdict {
                Ok(()) => inner.call(req).await,
                Err(rejection) => {
                    metrics::record_auth_failure(rejection.reason());
                    warn!(
                        method = %req.method(),
                        path = %req.uri().path(),
                        reason = rejection.reason(),
                        "Rejected request to protected route"
                    );
                    Ok(AppError::Unauthorized(rejection.message().to_string()).into_response())
                }
            }
        })
    }
}

/// Why a guarded request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Missing,
    Invalid,
    NotConfigured,
}

impl Rejection {
    fn reason(self) -> &'static str {
        match self {
            Rejection::Missing => "missing",
            Rejection::Invalid => "invalid",
            Rejection::NotConfigured => "not_configured",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Rejection::Missing => "API key required",
            Rejection::Invalid => "Invalid API key",
            Rejection::NotConfigured => "API key authentication is not configured",
        }
    }
}

/// Decide whether a request may proceed.
fn check_request<B>(
    req: &Request<B>,
    expected: Option<&String>,
    header: &HeaderName,
) -> Result<(), Rejection> {
    if is_safe_method(req.method()) {
        return Ok(());
    }

    let expected = expected.ok_or(Rejection::NotConfigured)?;
    let provided = extract_api_key(req, header).ok_or(Rejection::Missing)?;

    if constant_time_eq(provided, expected) {
        debug!(path = %req.uri().path(), "API key authentication successful");
        Ok(())
    } else {
        Err(Rejection::Invalid)
    }
}

/// Methods that never mutate the catalog.
fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Extract the API key from the configured header.
fn extract_api_key<'a, B>(req: &'a Request<B>, header: &HeaderName) -> Option<&'a str> {
    req.headers()
        .get(header)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Perform constant-time comparison of two strings.
///
/// This prevents timing attacks where an attacker could determine
/// the correct API key by measuring response times.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
