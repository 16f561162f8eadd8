//! Route keys and the entries stored in the trie.

use std::sync::Arc;

/// Suffix marking a wildcard route.
pub const WILDCARD: &str = "**";

/// Whether `key` ends with the wildcard marker.
#[must_use]
pub fn is_wildcard(key: &str) -> bool {
    key.ends_with(WILDCARD)
}

/// Trie key for a route key.
///
/// Strips the trailing `**` and the `/` directly before it, so that
/// `/api/**` is stored under `/api` and also matches the bare `/api`.
///
/// Wildcard matching is a plain string prefix, not segment-aware:
/// `/admin/**` also routes `/administrator`. Add an exact route for the
/// sibling path if it must go elsewhere.
#[must_use]
pub fn normalize(key: &str) -> &str {
    match key.strip_suffix(WILDCARD) {
        Some(stem) => stem.strip_suffix('/').unwrap_or(stem),
        None => key,
    }
}

/// A compiled route, owned by the trie node it is stored under.
#[derive(Debug)]
pub struct RouteEntry<S> {
    pub(crate) key: Arc<str>,
    pub(crate) path: Box<str>,
    pub(crate) spec: Arc<S>,
    pub(crate) wildcard: bool,
}

impl<S> RouteEntry<S> {
    pub fn new(key: &str, spec: S) -> Self {
        Self {
            key: Arc::from(key),
            path: normalize(key).into(),
            spec: Arc::new(spec),
            wildcard: is_wildcard(key),
        }
    }

    /// Route key as configured, marker included.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Normalized path the entry is stored under.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Whether this entry accepts `path`, given that the trie returned it
    /// for `path`.
    ///
    /// Exact routes compare lengths only. That is enough because the
    /// trie only hands back entries whose path is a prefix of the query.
    pub(crate) fn accepts(&self, path: &str) -> bool {
        debug_assert!(
            path.starts_with(&*self.path),
            "trie returned {:?} for non-prefixed path {path:?}",
            self.path
        );
        self.wildcard || path.len() == self.path.len()
    }
}

/// Outcome of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<S> {
    pub key: Arc<str>,
    pub spec: Arc<S>,
    pub wildcard: bool,
}

impl<S> Clone for RouteMatch<S> {
    fn clone(&self) -> Self {
        Self {
            key: Arc::clone(&self.key),
            spec: Arc::clone(&self.spec),
            wildcard: self.wildcard,
        }
    }
}

impl<S> From<&RouteEntry<S>> for RouteMatch<S> {
    fn from(entry: &RouteEntry<S>) -> Self {
        Self {
            key: Arc::clone(&entry.key),
            spec: Arc::clone(&entry.spec),
            wildcard: entry.wildcard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_marker_and_separator() {
        assert_eq!(normalize("/api/**"), "/api");
        assert_eq!(normalize("/api**"), "/api");
        assert_eq!(normalize("/**"), "");
        assert_eq!(normalize("**"), "");
        assert_eq!(normalize("/api"), "/api");
        assert_eq!(normalize("/api/"), "/api/");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn wildcard_only_as_suffix() {
        assert!(is_wildcard("/api/**"));
        assert!(!is_wildcard("/api/**/users"));
        assert!(!is_wildcard("/api/*"));
    }

    #[test]
    fn entry_keeps_raw_key() {
        let entry = RouteEntry::new("/users/**", "users");
        assert_eq!(entry.key(), "/users/**");
        assert_eq!(entry.path(), "/users");
        assert!(entry.is_wildcard());
    }

    #[test]
    fn exact_entry_accepts_only_equal_length() {
        let entry = RouteEntry::new("/users", ());
        assert!(entry.accepts("/users"));
        assert!(!entry.accepts("/users/42"));

        let wildcard = RouteEntry::new("/users/**", ());
        assert!(wildcard.accepts("/users"));
        assert!(wildcard.accepts("/users/42/orders"));
    }
}
