//! Route table and lookup.
//!
//! # Responsibilities
//! - Store prefix routes in configuration order
//! - Normalize and validate backend targets at construction
//! - Look up the first route covering a request path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered prefix scan (acceptable for typical route counts)
//! - Explicit `None` rather than a silent default route

use axum::http::HeaderValue;
use url::Url;

use crate::routing::matcher::PrefixMatcher;
use crate::routing::source::RouteLoadError;

/// A single prefix route.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    matcher: PrefixMatcher,
    target: String,
    authorization: Option<HeaderValue>,
}

impl RouteEntry {
    /// Build an entry, normalizing `url` and validating it as an absolute
    /// http(s) base URL. An empty `token` is treated as no credential.
    pub fn new(
        prefix: impl Into<String>,
        url: &str,
        token: Option<&str>,
    ) -> Result<Self, RouteLoadError> {
        let prefix = prefix.into();
        let target = url.trim_end_matches('/').to_string();
        validate_target(&prefix, &target)?;

        let authorization = match token.filter(|t| !t.is_empty()) {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                    RouteLoadError::InvalidField {
                        prefix: prefix.clone(),
                        field: "token",
                    }
                })?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        Ok(Self {
            matcher: PrefixMatcher::new(prefix),
            target,
            authorization,
        })
    }

    /// The prefix as configured.
    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    /// The backend base URL with trailing separators removed.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The ready-made `Authorization` value, if this route carries a credential.
    pub fn authorization(&self) -> Option<&HeaderValue> {
        self.authorization.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.authorization.is_some()
    }
}

fn validate_target(prefix: &str, target: &str) -> Result<(), RouteLoadError> {
    let invalid = |reason: &str| RouteLoadError::InvalidUrl {
        prefix: prefix.to_string(),
        url: target.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(target).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("base URL must not carry a query or fragment"));
    }
    Ok(())
}

/// The outcome of a successful lookup.
#[derive(Debug, Clone, Copy)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub remainder: &'a str,
}

/// Ordered, immutable collection of prefix routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// A table that matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from entries in the given order.
    ///
    /// Prefixes key the table: a repeated prefix replaces the earlier entry's
    /// target but keeps its position.
    pub fn from_entries(entries: impl IntoIterator<Item = RouteEntry>) -> Self {
        let mut table = Self::empty();
        for entry in entries {
            match table
                .entries
                .iter_mut()
                .find(|existing| existing.prefix() == entry.prefix())
            {
                Some(existing) => *existing = entry,
                None => table.entries.push(entry),
            }
        }
        table
    }

    /// Find the first route whose prefix covers `path`.
    pub fn lookup<'a>(&'a self, path: &'a str) -> Option<RouteMatch<'a>> {
        self.entries.iter().find_map(|entry| {
            entry
                .matcher
                .remainder(path)
                .map(|remainder| RouteMatch { entry, remainder })
        })
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(prefix: &str, url: &str) -> RouteEntry {
        RouteEntry::new(prefix, url, None).unwrap()
    }

    #[test]
    fn test_target_normalization() {
        let e = entry("/minikube/", "http://127.0.0.1:8001/");
        assert_eq!(e.target(), "http://127.0.0.1:8001");

        let e = entry("/svc/", "https://internal.example.com/api//");
        assert_eq!(e.target(), "https://internal.example.com/api");
    }

    #[test]
    fn test_credential_becomes_bearer_header() {
        let e = RouteEntry::new("/svc/", "https://internal.example.com/api/", Some("s3cr3t")).unwrap();
        let value = e.authorization().unwrap();
        assert_eq!(value, "Bearer s3cr3t");
        assert!(value.is_sensitive());

        let e = RouteEntry::new("/svc/", "https://internal.example.com/", Some("")).unwrap();
        assert!(!e.has_credential());
    }

    #[test]
    fn test_rejects_unusable_targets() {
        for url in ["not a url", "ftp://host/", "http://host/api?x=1", "mailto:ops@example.com"] {
            let err = RouteEntry::new("/x/", url, None).unwrap_err();
            assert!(
                matches!(err, RouteLoadError::InvalidUrl { .. }),
                "{url} should be rejected"
            );
        }

        let err = RouteEntry::new("/x/", "http://host/", Some("bad\ntoken")).unwrap_err();
        assert!(matches!(err, RouteLoadError::InvalidField { field: "token", .. }));
    }

    #[test]
    fn test_lookup_returns_remainder() {
        let table = RouteTable::from_entries([entry("/minikube/", "http://127.0.0.1:8001/")]);

        let m = table.lookup("minikube/api/v1/pods").unwrap();
        assert_eq!(m.entry.prefix(), "/minikube/");
        assert_eq!(m.remainder, "api/v1/pods");

        let m = table.lookup("minikube/").unwrap();
        assert_eq!(m.remainder, "");

        assert!(table.lookup("unknown/thing").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let broad_first = RouteTable::from_entries([
            entry("/a/", "http://broad.local/"),
            entry("/a/b/", "http://narrow.local/"),
        ]);
        let m = broad_first.lookup("a/b/x").unwrap();
        assert_eq!(m.entry.target(), "http://broad.local");
        assert_eq!(m.remainder, "b/x");

        let narrow_first = RouteTable::from_entries([
            entry("/a/b/", "http://narrow.local/"),
            entry("/a/", "http://broad.local/"),
        ]);
        let m = narrow_first.lookup("a/b/x").unwrap();
        assert_eq!(m.entry.target(), "http://narrow.local");
        assert_eq!(m.remainder, "x");
    }

    #[test]
    fn test_duplicate_prefix_keeps_position() {
        let table = RouteTable::from_entries([
            entry("/a/", "http://first.local/"),
            entry("/b/", "http://second.local/"),
            entry("/a/", "http://replacement.local/"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].target(), "http://replacement.local");
        assert_eq!(table.entries()[1].prefix(), "/b/");
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let table = RouteTable::empty();
        assert!(table.is_empty());
        assert!(table.lookup("").is_none());
        assert!(table.lookup("minikube/").is_none());
    }
}
