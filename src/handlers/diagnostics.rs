//! Diagnostic routes and the unmatched-route fallback.

use axum::http::Uri;
use tracing::instrument;

use crate::error::{AppError, AppResult};

/// Always fails with a simulated internal error.
///
/// Exercises the error boundary end to end: the response is the uniform
/// 500 body and the server keeps serving afterwards.
#[instrument]
pub async fn error_test() -> AppResult<()> {
    Err(AppError::Internal("This is a simulated error".to_string()))
}

/// Fallback for routes that do not exist.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
