//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! forwarding / routing / http
//!     → tracing events (debug: outbound method, URL, headers; backend status, headers)
//!     → tracing events (error: route load failures, upstream failures)
//!     → logging.rs subscriber (stdout)
//! ```
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Request ID recorded on every request span
//! - Log level configurable via config and environment

pub mod logging;

pub use logging::init_logging;
