//! Prefix-routing reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ forwarding::Forwarder ──▶ routing::RouteTable
//!                                            │                   (first prefix match)
//!                                            ▼
//!                                     rewrite target URL,
//!                                     drop Host, inject Bearer
//!                                            │
//!                                            ▼
//!     Client Response                  forwarding::upstream ──────────────▶ Backend
//!     ◀────────────── status + body + Content-Type only ◀─────────────────
//! ```
//!
//! The route table is loaded once (fail open to empty) and injected into the
//! forwarder; nothing is shared mutably between requests.

// Core subsystems
pub mod config;
pub mod forwarding;
pub mod http;
pub mod net;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use forwarding::{Forwarder, ProxyError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{RouteSource, RouteTable};
