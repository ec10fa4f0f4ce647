//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! listener.tls configured?
//!     yes → tls.rs (load PEM pair) → HttpServer::run_tls
//!     no  → tokio TcpListener     → HttpServer::run
//! ```
//!
//! Certificates are provisioned outside the proxy; this layer only loads them.

pub mod tls;

pub use tls::load_tls_config;
