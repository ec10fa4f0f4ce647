//! Outbound request construction.
//!
//! # Responsibilities
//! - Join a route's target base URL with the request remainder
//! - Sanitize inbound headers and inject the route credential
//!
//! # Design Decisions
//! - The target URL is built by concatenation, not relative-reference
//!   resolution: `base + "/" + remainder`. A remainder that looks like a
//!   scheme (`http:x`) or a network path stays under the base path.
//! - Dot segments are dropped from the remainder so `..` can never climb
//!   above the base path; backslashes are percent-encoded for the same reason.
//! - The query string is appended verbatim.

use axum::http::{header, HeaderMap, HeaderValue};
use url::Url;

use crate::forwarding::request::{InboundRequest, OutboundRequest};
use crate::routing::RouteMatch;

/// Join a normalized base URL with a remainder and optional query.
///
/// An empty remainder yields the base URL with a trailing separator.
pub fn join_target_url(base: &str, remainder: &str, query: Option<&str>) -> Result<Url, url::ParseError> {
    let remainder = remainder.trim_start_matches('/');

    let mut joined = String::with_capacity(base.len() + remainder.len() + 2);
    joined.push_str(base.trim_end_matches('/'));
    joined.push('/');

    let mut first = true;
    for segment in remainder.split('/').filter(|s| !is_dot_segment(s)) {
        if !first {
            joined.push('/');
        }
        first = false;
        joined.push_str(&segment.replace('\\', "%5C"));
    }

    if let Some(query) = query {
        joined.push('?');
        joined.push_str(query);
    }

    Url::parse(&joined)
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."
    )
}

/// Copy inbound headers for the backend.
///
/// `Host` is dropped so the client addresses the backend itself; a route
/// credential always replaces any inbound `Authorization`.
pub fn outbound_headers(inbound: &HeaderMap, authorization: Option<&HeaderValue>) -> HeaderMap {
    let mut headers = inbound.clone();
    headers.remove(header::HOST);
    if let Some(value) = authorization {
        headers.insert(header::AUTHORIZATION, value.clone());
    }
    headers
}

/// Render a cookie map as a single `Cookie` header value.
fn cookie_header(request: &InboundRequest) -> Option<HeaderValue> {
    if request.cookies.is_empty() {
        return None;
    }
    let rendered = request
        .cookies
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ");
    HeaderValue::from_str(&rendered).ok()
}

impl OutboundRequest {
    /// Derive the backend request for a matched route.
    pub fn build(
        request: &InboundRequest,
        matched: &RouteMatch<'_>,
        query: Option<&str>,
    ) -> Result<Self, url::ParseError> {
        let url = join_target_url(matched.entry.target(), matched.remainder, query)?;
        let mut headers = outbound_headers(&request.headers, matched.entry.authorization());

        if !headers.contains_key(header::COOKIE) {
            if let Some(cookies) = cookie_header(request) {
                headers.insert(header::COOKIE, cookies);
            }
        }

        Ok(Self {
            method: request.method.clone(),
            url,
            headers,
            body: request.body.clone(),
        })
    }
}
