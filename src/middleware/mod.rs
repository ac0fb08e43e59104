//! HTTP middleware for access control and observability.
//!
//! - **API Key Guard**: Constant-time shared-secret check on mutating routes
//! - **Request ID**: Generation and propagation of `X-Request-Id`
//! - **Entry Trace**: Per-request arrival/completion logging and metrics
//!
//! # Architecture
//!
//! ```text
//! Request → Request ID → Entry Trace → Router → [API Key Guard] → Handler
//!               ↓             ↓                        ↓
//!        X-Request-Id     log + metrics         401 Unauthorized
//! ```

pub mod auth;
pub mod request_id;
pub mod trace;

pub use auth::{API_KEY_HEADER, ApiKeyAuth};
pub use request_id::{REQUEST_ID_HEADER, RequestIdExt, RequestIdLayer};
pub use trace::trace_requests;
