//! Prefix matching logic.
//!
//! # Responsibilities
//! - Match an inbound path against one configured prefix
//! - Compute the remainder left after removing the prefix
//!
//! # Design Decisions
//! - Paths and prefixes are compared with leading separators removed
//! - A trailing separator on the configured prefix is part of the match, so
//!   `/api/` covers `api/x` and `api/` but not `apix` or `api`
//! - The remainder is cut after the fully stripped prefix and has its
//!   leading separators removed
//! - Case-sensitive, no regex

const SEPARATOR: char = '/';

/// Matches inbound paths against a single configured prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatcher {
    /// Prefix exactly as configured.
    prefix: String,
    /// Prefix with leading separators removed.
    match_key: String,
    /// Length of the prefix with both leading and trailing separators removed.
    strip_len: usize,
}

impl PrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let match_key = prefix.trim_start_matches(SEPARATOR).to_string();
        let strip_len = match_key.trim_end_matches(SEPARATOR).len();
        Self {
            prefix,
            match_key,
            strip_len,
        }
    }

    /// The prefix as it appeared in configuration.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The prefix with leading and trailing separators removed.
    pub fn stripped(&self) -> &str {
        &self.match_key[..self.strip_len]
    }

    /// Returns the remainder of `path` if it falls under this prefix.
    pub fn remainder<'a>(&self, path: &'a str) -> Option<&'a str> {
        let path = path.trim_start_matches(SEPARATOR);
        if !path.starts_with(&self.match_key) {
            return None;
        }
        // `stripped()` is a prefix of `match_key`, so this is a char boundary.
        Some(path[self.strip_len..].trim_start_matches(SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_normalization() {
        let matcher = PrefixMatcher::new("//minikube/");
        assert_eq!(matcher.prefix(), "//minikube/");
        assert_eq!(matcher.stripped(), "minikube");
    }

    #[test]
    fn test_remainder_extraction() {
        let matcher = PrefixMatcher::new("/minikube/");

        assert_eq!(matcher.remainder("minikube/api/v1/pods"), Some("api/v1/pods"));
        assert_eq!(matcher.remainder("/minikube/api/v1/pods"), Some("api/v1/pods"));
        assert_eq!(matcher.remainder("minikube/"), Some(""));
        assert_eq!(matcher.remainder("minikube//double"), Some("double"));
    }

    #[test]
    fn test_trailing_separator_is_part_of_match() {
        let matcher = PrefixMatcher::new("/minikube/");
        assert_eq!(matcher.remainder("minikube"), None);
        assert_eq!(matcher.remainder("minikubex/y"), None);

        // Without a trailing separator the prefix is a plain string prefix.
        let bare = PrefixMatcher::new("/svc");
        assert_eq!(bare.remainder("svc"), Some(""));
        assert_eq!(bare.remainder("svc/a"), Some("a"));
        assert_eq!(bare.remainder("svcx/a"), Some("x/a"));
    }

    #[test]
    fn test_root_prefix_matches_everything() {
        let matcher = PrefixMatcher::new("/");
        assert_eq!(matcher.stripped(), "");
        assert_eq!(matcher.remainder("anything/at/all"), Some("anything/at/all"));
        assert_eq!(matcher.remainder(""), Some(""));
    }

    #[test]
    fn test_case_sensitive() {
        let matcher = PrefixMatcher::new("/api/");
        assert_eq!(matcher.remainder("API/x"), None);
    }

    #[test]
    fn test_remainder_is_stable_under_restripping() {
        let matcher = PrefixMatcher::new("/a/");
        for path in ["a/b/c", "a///b", "/a/", "a/b/"] {
            let remainder = matcher.remainder(path).unwrap();
            assert_eq!(remainder, remainder.trim_start_matches('/'));
        }
    }
}
