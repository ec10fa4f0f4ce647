//! Upstream dispatch.
//!
//! # Responsibilities
//! - Send one outbound request to a backend
//! - Buffer the backend response completely
//!
//! # Design Decisions
//! - Redirects are returned to the caller, never followed
//! - Connect and total deadlines are explicit and configurable
//! - Exactly one attempt per request; failures are classified, not retried

use std::future::Future;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use thiserror::Error;

use crate::config::TimeoutConfig;
use crate::forwarding::request::OutboundRequest;

/// A fully buffered backend response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Transport-level failure reaching a backend.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("upstream timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("could not connect to upstream: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("upstream exchange failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),
}

impl From<reqwest::Error> for DispatchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            DispatchError::Timeout(e)
        } else if e.is_connect() {
            DispatchError::Connect(e)
        } else {
            DispatchError::Transport(e)
        }
    }
}

/// Sends outbound requests to backends.
pub trait Dispatch: Send + Sync {
    fn dispatch(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, DispatchError>> + Send;
}

/// [`Dispatch`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
}

impl HttpDispatcher {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .build()
            .map_err(DispatchError::Client)?;
        Ok(Self { client })
    }
}

impl Dispatch for HttpDispatcher {
    async fn dispatch(&self, request: OutboundRequest) -> Result<UpstreamResponse, DispatchError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
