//! Caller-visible forwarding failures.

use axum::http::StatusCode;
use thiserror::Error;

use crate::forwarding::upstream::DispatchError;

/// Why a request could not be relayed.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// No configured prefix covers the request path.
    #[error("No matching proxy route found")]
    NoRoute,

    /// The backend could not be reached or the exchange broke off.
    #[error("Proxy request failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// The joined target is not a valid URL.
    #[error("Proxy request failed: invalid target URL: {0}")]
    InvalidTarget(#[from] url::ParseError),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoRoute => StatusCode::NOT_FOUND,
            Self::Dispatch(_) | Self::InvalidTarget(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
