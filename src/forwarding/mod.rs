//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! InboundRequest (method, path, headers, body, cookies)
//!     → forwarder.rs (route lookup via RouteTable)
//!     → rewrite.rs (target URL join, header sanitation, credential injection)
//!     → upstream.rs (single dispatch, redirects not followed, fully buffered)
//!     → ForwardedResponse (status + body + Content-Type only)
//! ```
//!
//! # Design Decisions
//! - The route table and dispatcher are injected at construction
//! - No retries: one failed attempt is surfaced immediately as 502
//! - Only `Content-Type` survives from the backend's response headers
//! - No state is kept across calls

pub mod error;
pub mod forwarder;
pub mod request;
pub mod rewrite;
pub mod upstream;

pub use error::ProxyError;
pub use forwarder::{ForwardedResponse, Forwarder};
pub use request::{InboundRequest, OutboundRequest};
pub use upstream::{Dispatch, DispatchError, HttpDispatcher, UpstreamResponse};
