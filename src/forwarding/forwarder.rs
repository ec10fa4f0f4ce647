//! Route-match-and-forward pipeline.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};

use crate::forwarding::error::ProxyError;
use crate::forwarding::request::{InboundRequest, OutboundRequest};
use crate::forwarding::upstream::{Dispatch, UpstreamResponse};
use crate::routing::RouteTable;

/// What the caller receives for a relayed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedResponse {
    pub status: StatusCode,
    /// The only backend header that is relayed.
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl From<UpstreamResponse> for ForwardedResponse {
    fn from(response: UpstreamResponse) -> Self {
        Self {
            status: response.status,
            content_type: response.headers.get(header::CONTENT_TYPE).cloned(),
            body: response.body,
        }
    }
}

/// Matches requests against a route table and relays them to backends.
#[derive(Debug)]
pub struct Forwarder<D> {
    routes: Arc<RouteTable>,
    dispatcher: D,
}

impl<D: Dispatch> Forwarder<D> {
    pub fn new(routes: Arc<RouteTable>, dispatcher: D) -> Self {
        Self { routes, dispatcher }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Forward one request to the backend of the first matching route.
    pub async fn handle(&self, request: InboundRequest) -> Result<ForwardedResponse, ProxyError> {
        let (path, query) = request.split_path();

        let Some(matched) = self.routes.lookup(path) else {
            tracing::debug!(path = %path, "No matching proxy route");
            return Err(ProxyError::NoRoute);
        };

        let outbound = OutboundRequest::build(&request, &matched, query).map_err(|e| {
            tracing::error!(
                prefix = %matched.entry.prefix(),
                remainder = %matched.remainder,
                error = %e,
                "Failed to build target URL"
            );
            ProxyError::InvalidTarget(e)
        })?;

        tracing::debug!(
            method = %outbound.method,
            url = %outbound.url,
            headers = ?outbound.headers,
            "Proxying request"
        );

        match self.dispatcher.dispatch(outbound).await {
            Ok(response) => {
                tracing::debug!(
                    status = %response.status,
                    headers = ?response.headers,
                    "Backend response"
                );
                Ok(response.into())
            }
            Err(e) => {
                tracing::error!(error = %e, "Proxy request failed");
                Err(ProxyError::Dispatch(e))
            }
        }
    }
}
