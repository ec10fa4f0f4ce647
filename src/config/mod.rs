//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! proxy config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → handed to HttpServer at construction
//! ```
//!
//! The route table is configured separately (see `routing::source`) because it
//! follows a fail-open policy, while a broken process configuration is fatal.
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    LimitsConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, RoutesConfig, TimeoutConfig,
    TlsConfig,
};
pub use validation::{validate_config, ValidationError};
