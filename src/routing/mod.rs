//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Table construction (at startup):
//!     RouteSource (defaults | TOML file)
//!     → source.rs (parse, fail open to empty table)
//!     → router.rs (normalize targets, freeze as immutable RouteTable)
//!
//! Incoming request path
//!     → router.rs (ordered scan)
//!     → matcher.rs (literal prefix test, remainder extraction)
//!     → Return: RouteMatch or None
//! ```
//!
//! # Design Decisions
//! - Routes loaded once, immutable at runtime (shared via Arc, no locks)
//! - Prefixes are plain strings, never regexes
//! - First match wins, in configuration order (not most specific)

pub mod matcher;
pub mod router;
pub mod source;

pub use matcher::PrefixMatcher;
pub use router::{RouteEntry, RouteMatch, RouteTable};
pub use source::{RouteLoadError, RouteSource};
