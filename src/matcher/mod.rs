//! Trie-backed route matching with lock-free hot reload.
//!
//! [`TrieRouteMatcher`] compiles a route map into a fresh [`Trie`] on
//! every [`set_routes`](TrieRouteMatcher::set_routes) call and publishes
//! it through an [`ArcSwapOption`]. Lookups load whichever snapshot is
//! current and never block, and never observe a half-built table.
//!
//! # Matching rules
//!
//! The trie returns the entry stored under the longest route path that
//! is a prefix of the request path. Wildcard routes (`/api/**`) accept
//! that hit unconditionally; exact routes accept it only when the
//! request path has the same length as the route path.
//!
//! The deepest entry always decides. With `/users/**` and `/users/admin`
//! configured, `/users/admin/x` lands on the exact `/users/admin` entry
//! and resolves to nothing; it does not fall back to the wildcard.
//!
//! # Collisions
//!
//! `/api` and `/api/**` share the trie key `/api`. The exact route is
//! kept and the wildcard route dropped, whatever the input order. Two
//! routes of the same kind on one key keep the last one seen.

mod route;

pub use route::{is_wildcard, normalize, RouteEntry, RouteMatch, WILDCARD};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::error::RouteTrieError;
use crate::trie::{Trie, TrieFactory, TrieKind};

/// One fully built route table.
pub struct RouteSnapshot<S> {
    trie: Box<dyn Trie<RouteEntry<S>>>,
    revision: u64,
}

impl<S> RouteSnapshot<S> {
    /// Resolve `path` against this snapshot only.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<RouteMatch<S>> {
        self.trie
            .prefix(path)
            .filter(|entry| entry.accepts(path))
            .map(RouteMatch::from)
    }

    /// Sequence number of the `set_routes` call that built this snapshot,
    /// starting at 1.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}

pub struct TrieRouteMatcher<S, F = TrieKind> {
    factory: F,
    current: ArcSwapOption<RouteSnapshot<S>>,
    revision: AtomicU64,
}

impl<S, F> TrieRouteMatcher<S, F>
where
    S: Send + Sync + 'static,
    F: TrieFactory,
{
    /// Create a matcher with no published routes.
    ///
    /// Lookups fail with [`RouteTrieError::NotReady`] until the first
    /// [`set_routes`](Self::set_routes).
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            current: ArcSwapOption::empty(),
            revision: AtomicU64::new(0),
        }
    }

    /// Replace the whole route table.
    ///
    /// Builds a new trie from `routes` and swaps it in with a single
    /// atomic store. Lookups already running finish against the table
    /// they loaded. Callers are expected to serialize `set_routes` calls;
    /// concurrent writers each publish a complete table but the last
    /// store wins.
    pub fn set_routes<I, K>(&self, routes: I)
    where
        I: IntoIterator<Item = (K, S)>,
        K: AsRef<str>,
    {
        let mut trie = self.factory.create_trie::<RouteEntry<S>>();
        for (key, spec) in routes {
            insert(&mut *trie, RouteEntry::new(key.as_ref(), spec));
        }

        let revision = self.revision.fetch_add(1, Ordering::Relaxed) + 1;
        let routes = trie.len();
        self.current
            .store(Some(Arc::new(RouteSnapshot { trie, revision })));

        tracing::debug!(routes, revision, "route table published");
    }

    /// Resolve `path` to the spec of its route.
    ///
    /// `Ok(None)` means no route matches. [`RouteTrieError::NotReady`] is
    /// returned only if routes were never set.
    pub fn get_matching_route(&self, path: &str) -> Result<Option<Arc<S>>, RouteTrieError> {
        self.find_route(path).map(|found| found.map(|m| m.spec))
    }

    /// Like [`get_matching_route`](Self::get_matching_route), but also
    /// reports which route key matched.
    pub fn find_route(&self, path: &str) -> Result<Option<RouteMatch<S>>, RouteTrieError> {
        let current = self.current.load();
        let Some(snapshot) = &*current else {
            return Err(RouteTrieError::NotReady);
        };
        Ok(snapshot.find(path))
    }

    /// The currently published table, if any.
    ///
    /// Holding the returned `Arc` pins that table: repeated lookups on it
    /// see the same routes even if a reload happens in between.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<RouteSnapshot<S>>> {
        self.current.load_full()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.current.load().is_some()
    }
}

impl<S> Default for TrieRouteMatcher<S>
where
    S: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(TrieKind::default())
    }
}

fn insert<S>(trie: &mut dyn Trie<RouteEntry<S>>, entry: RouteEntry<S>) {
    if let Some(existing) = trie.get(&entry.path) {
        if !existing.wildcard && entry.wildcard {
            tracing::warn!(
                path = %entry.path,
                kept = %existing.key,
                dropped = %entry.key,
                "exact route shadows wildcard route"
            );
            return;
        }
        if existing.wildcard && !entry.wildcard {
            tracing::warn!(
                path = %entry.path,
                kept = %entry.key,
                dropped = %existing.key,
                "exact route shadows wildcard route"
            );
        } else {
            tracing::warn!(
                path = %entry.path,
                kept = %entry.key,
                dropped = %existing.key,
                "duplicate route path, keeping the last one"
            );
        }
    }

    let path = entry.path.clone();
    trie.put(&path, entry);
}
