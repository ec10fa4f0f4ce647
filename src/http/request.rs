//! Request identification.
//!
//! Each request span carries a request ID: the caller's `x-request-id` when
//! present, otherwise a fresh UUID v4. The ID lives only on the span; the
//! request's headers are never modified, so backends see exactly what the
//! caller sent.

use axum::http::Request;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// The caller's request ID, or a newly generated one.
pub fn request_id<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
