//! Request ID middleware.
//!
//! Every request gets an `X-Request-Id`: the caller's value is kept when it
//! is present and printable, otherwise a UUIDv4 is generated. The id is
//! written back onto the request (so the entry trace and handlers can log
//! it) and onto the response (so clients can quote it when reporting a
//! failure).
//!
//! ```bash
//! curl -i -H "X-Request-Id: my-correlation-id" http://localhost:3000/api/products
//! ```

use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::header::HeaderValue;
use axum::http::{HeaderName, Request, Response};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest caller-supplied id that is propagated as-is.
const MAX_REQUEST_ID_LENGTH: usize = 128;

/// Request ID layer for Tower middleware stack.
#[derive(Clone, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Request ID service wrapper.
#[derive(Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
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

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let request_id = incoming_request_id(&req).unwrap_or_else(generate_request_id);
        req.headers_mut()
            .insert(REQUEST_ID_HEADER, request_id.clone());

        let mut inner = self.inner.clone();

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
            Ok(response)
        })
    }
}

/// Caller-supplied id, if it is usable.
fn incoming_request_id<B>(req: &Request<B>) -> Option<HeaderValue> {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| {
            !v.is_empty()
                && v.len() <= MAX_REQUEST_ID_LENGTH
                && v.to_str().is_ok_and(|s| s.chars().all(|c| c.is_ascii_graphic()))
        })
        .cloned()
}

/// Fresh UUIDv4 id.
fn generate_request_id() -> HeaderValue {
    // A hyphenated UUID is always a valid header value
    HeaderValue::from_str(&Uuid::new_v4().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

/// Extension trait to read the request ID from a request.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<String>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<String> {
        self.headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_request_id_is_kept() {
        let req = Request::builder()
            .header("x-request-id", "existing-id-123")
            .body(Body::empty())
            .unwrap();

        assert_eq!(incoming_request_id(&req).unwrap(), "existing-id-123");
    }

    #[test]
    fn test_unprintable_request_id_is_replaced() {
        let req = Request::builder()
            .header("x-request-id", "has space")
            .body(Body::empty())
            .unwrap();

        assert!(incoming_request_id(&req).is_none());
    }

    #[test]
    fn test_overlong_request_id_is_replaced() {
        let req = Request::builder()
            .header("x-request-id", "a".repeat(MAX_REQUEST_ID_LENGTH + 1))
            .body(Body::empty())
            .unwrap();

        assert!(incoming_request_id(&req).is_none());
    }

    #[test]
    fn test_generated_request_id_is_uuid() {
        let id = generate_request_id();
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_request_id_ext_trait() {
        let req = Request::builder()
            .header("x-request-id", "test-id")
            .body(Body::empty())
            .unwrap();
        assert_eq!(req.request_id(), Some("test-id".to_string()));

        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(req.request_id(), None);
    }
}
