//! Route table loading.
//!
//! A route document is a TOML table of tables keyed by prefix:
//!
//! ```toml
//! ["/minikube/"]
//! url = "http://127.0.0.1:8001/"
//!
//! ["/svc/"]
//! url = "https://internal.example.com/api/"
//! token = "s3cr3t"
//! ```
//!
//! Loading fails open: any problem with the source is logged and produces an
//! empty table, so the process keeps serving unrelated endpoints.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml::{Table, Value};

use crate::routing::router::{RouteEntry, RouteTable};

/// Prefix and target of the built-in route.
pub const DEFAULT_ROUTES: &[(&str, &str)] = &[("/minikube/", "http://127.0.0.1:8001/")];

/// Where a route table is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSource {
    /// The in-process default mapping.
    Defaults,
    /// A TOML route document on disk.
    File(PathBuf),
}

/// Reasons a route source is rejected.
#[derive(Debug, Error)]
pub enum RouteLoadError {
    #[error("failed to read route file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse route document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("route `{0}` is not a table")]
    NotATable(String),

    #[error("route `{0}` has no `url`")]
    MissingUrl(String),

    #[error("route `{prefix}` has an invalid `{field}` field")]
    InvalidField { prefix: String, field: &'static str },

    #[error("route `{prefix}` has an unusable url `{url}`: {reason}")]
    InvalidUrl {
        prefix: String,
        url: String,
        reason: String,
    },
}

impl RouteTable {
    /// Load a route table, degrading to an empty table on any error.
    pub fn load(source: &RouteSource) -> RouteTable {
        let result = match source {
            RouteSource::Defaults => default_routes(),
            RouteSource::File(path) => read_routes(path),
        };

        match result {
            Ok(table) => {
                tracing::info!(source = ?source, routes = table.len(), "Route table loaded");
                table
            }
            Err(e) => {
                tracing::error!(
                    source = ?source,
                    error = %e,
                    "Failed to load route table, no routes will match"
                );
                RouteTable::empty()
            }
        }
    }
}

fn default_routes() -> Result<RouteTable, RouteLoadError> {
    let entries = DEFAULT_ROUTES
        .iter()
        .map(|(prefix, url)| RouteEntry::new(*prefix, url, None))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RouteTable::from_entries(entries))
}

/// Read and parse a route document from disk.
pub fn read_routes(path: &Path) -> Result<RouteTable, RouteLoadError> {
    let content = fs::read_to_string(path).map_err(|source| RouteLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_routes(&content)
}

/// Parse a route document, preserving document order.
pub fn parse_routes(content: &str) -> Result<RouteTable, RouteLoadError> {
    let root: Table = toml::from_str(content)?;

    let mut entries = Vec::with_capacity(root.len());
    for (prefix, value) in &root {
        let Value::Table(fields) = value else {
            return Err(RouteLoadError::NotATable(prefix.clone()));
        };

        let url = match fields.get("url") {
            Some(Value::String(url)) => url,
            Some(_) => {
                return Err(RouteLoadError::InvalidField {
                    prefix: prefix.clone(),
                    field: "url",
                })
            }
            None => return Err(RouteLoadError::MissingUrl(prefix.clone())),
        };

        let token = match fields.get("token") {
            Some(Value::String(token)) => Some(token.as_str()),
            Some(_) => {
                return Err(RouteLoadError::InvalidField {
                    prefix: prefix.clone(),
                    field: "token",
                })
            }
            None => None,
        };

        entries.push(RouteEntry::new(prefix.clone(), url, token)?);
    }

    Ok(RouteTable::from_entries(entries))
}
