//! Response rendering.
//!
//! # Responsibilities
//! - Turn a relayed backend response into the caller's response
//! - Map forwarding failures to a status and a small JSON diagnostic
//!
//! # Design Decisions
//! - Relayed responses carry only `Content-Type`; every other backend header
//!   (cookies, caching, custom headers) is dropped
//! - Bodies are already fully buffered when they reach this layer

use axum::body::Body;
use axum::http::{header, Response};
use axum::response::{IntoResponse, Json};
use serde_json::json;

use crate::forwarding::{ForwardedResponse, ProxyError};

impl IntoResponse for ForwardedResponse {
    fn into_response(self) -> axum::response::Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        if let Some(content_type) = self.content_type {
            response.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }
        response
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
