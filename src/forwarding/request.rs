//! Per-request data carried through the forwarder.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::http::{header, request::Parts, HeaderMap, Method};
use url::Url;

/// A request received by the proxy, owned by one forwarding call.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    /// Path without leading separator, including any `?query`.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub cookies: BTreeMap<String, String>,
}

impl InboundRequest {
    pub fn new(method: Method, path: impl AsRef<str>) -> Self {
        Self {
            method,
            path: path.as_ref().trim_start_matches('/').to_string(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            cookies: BTreeMap::new(),
        }
    }

    /// Build from the parts of an axum request and its buffered body.
    pub fn from_parts(parts: &Parts, body: Bytes) -> Self {
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| parts.uri.path());

        Self {
            method: parts.method.clone(),
            path: path.trim_start_matches('/').to_string(),
            cookies: parse_cookies(&parts.headers),
            headers: parts.headers.clone(),
            body,
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.cookies = parse_cookies(&headers);
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Split the path into route-matchable path and optional query string.
    pub fn split_path(&self) -> (&str, Option<&str>) {
        match self.path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (&self.path, None),
        }
    }
}

/// Collect `name=value` pairs from every `Cookie` header.
pub fn parse_cookies(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// The request sent to a backend.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Bytes,
}
