//! Prefix tries used to store compiled routes.
//!
//! The [`Trie`] trait is the storage contract the matcher relies on:
//! build once with [`Trie::put`], then answer longest-prefix queries
//! with [`Trie::prefix`]. Three backends are provided and selected
//! through a [`TrieFactory`], usually a [`TrieKind`]:
//!
//! - [`HashMapTrie`] -- one node per `char`, children in a `HashMap`.
//! - [`ArrayTrie`] -- one node per byte, children in a sorted `Vec`.
//! - [`RadixTrie`] -- compressed byte-label edges, one node per branch.
//!
//! All backends share the same contract: the value returned by
//! [`Trie::prefix`] was stored under a key that is a byte prefix of the
//! queried path. The matcher's exact-length check depends on it.

mod array;
mod hash_map;
mod radix;

pub use array::ArrayTrie;
pub use hash_map::HashMapTrie;
pub use radix::RadixTrie;

/// Prefix-keyed storage with longest-prefix retrieval.
///
/// A trie is mutated only while it is being built. Once handed to the
/// matcher it is shared read-only across threads.
pub trait Trie<T>: Send + Sync {
    /// Store `value` under `key`, returning the value it replaced.
    fn put(&mut self, key: &str, value: T) -> Option<T>;

    /// Value stored under exactly `key`.
    fn get(&self, key: &str) -> Option<&T>;

    /// Value stored under the longest key that is a prefix of `path`.
    fn prefix(&self, path: &str) -> Option<&T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Produces empty tries on demand.
///
/// Injected into the matcher at construction; every route rebuild asks
/// it for a fresh instance.
pub trait TrieFactory: Send + Sync {
    fn create_trie<T: Send + Sync + 'static>(&self) -> Box<dyn Trie<T>>;
}

/// Built-in trie backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TrieKind {
    #[default]
    HashMap,
    Array,
    Radix,
}

impl TrieKind {
    pub const ALL: [Self; 3] = [Self::HashMap, Self::Array, Self::Radix];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HashMap => "hash-map",
            Self::Array => "array",
            Self::Radix => "radix",
        }
    }
}

impl std::fmt::Display for TrieKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TrieFactory for TrieKind {
    fn create_trie<T: Send + Sync + 'static>(&self) -> Box<dyn Trie<T>> {
        match self {
            Self::HashMap => Box::new(HashMapTrie::new()),
            Self::Array => Box::new(ArrayTrie::new()),
            Self::Radix => Box::new(RadixTrie::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn each_backend(check: impl Fn(TrieKind, Box<dyn Trie<u32>>)) {
        for kind in TrieKind::ALL {
            check(kind, kind.create_trie());
        }
    }

    #[test]
    fn empty_trie_has_no_prefix() {
        each_backend(|kind, trie| {
            assert!(trie.is_empty(), "{kind}");
            assert_eq!(trie.prefix("/anything"), None, "{kind}");
            assert_eq!(trie.prefix(""), None, "{kind}");
            assert_eq!(trie.get(""), None, "{kind}");
        });
    }

    #[test]
    fn prefix_returns_deepest_value() {
        each_backend(|kind, mut trie| {
            trie.put("/api", 1);
            trie.put("/api/users", 2);
            trie.put("/apple", 3);

            assert_eq!(trie.prefix("/api/users/42"), Some(&2), "{kind}");
            assert_eq!(trie.prefix("/api/user"), Some(&1), "{kind}");
            assert_eq!(trie.prefix("/api"), Some(&1), "{kind}");
            assert_eq!(trie.prefix("/apple/pie"), Some(&3), "{kind}");
            assert_eq!(trie.prefix("/ap"), None, "{kind}");
            assert_eq!(trie.prefix("/orders"), None, "{kind}");
        });
    }

    #[test]
    fn empty_key_is_a_prefix_of_everything() {
        each_backend(|kind, mut trie| {
            trie.put("", 0);
            trie.put("/a", 1);

            assert_eq!(trie.prefix(""), Some(&0), "{kind}");
            assert_eq!(trie.prefix("/b"), Some(&0), "{kind}");
            assert_eq!(trie.prefix("/a/b"), Some(&1), "{kind}");
            assert_eq!(trie.get(""), Some(&0), "{kind}");
        });
    }

    #[test]
    fn put_replaces_and_reports_previous_value() {
        each_backend(|kind, mut trie| {
            assert_eq!(trie.put("/a", 1), None, "{kind}");
            assert_eq!(trie.put("/a", 2), Some(1), "{kind}");
            assert_eq!(trie.len(), 1, "{kind}");
            assert_eq!(trie.get("/a"), Some(&2), "{kind}");
        });
    }

    #[test]
    fn get_requires_exact_key() {
        each_backend(|kind, mut trie| {
            trie.put("/users/admin", 1);

            assert_eq!(trie.get("/users/admin"), Some(&1), "{kind}");
            assert_eq!(trie.get("/users"), None, "{kind}");
            assert_eq!(trie.get("/users/admins"), None, "{kind}");
            assert_eq!(trie.len(), 1, "{kind}");
        });
    }

    #[test]
    fn inserting_a_shorter_key_after_a_longer_one() {
        each_backend(|kind, mut trie| {
            trie.put("/users/admin", 1);
            trie.put("/users", 2);
            trie.put("/usage", 3);

            assert_eq!(trie.len(), 3, "{kind}");
            assert_eq!(trie.prefix("/users/ad"), Some(&2), "{kind}");
            assert_eq!(trie.prefix("/users/admin/x"), Some(&1), "{kind}");
            assert_eq!(trie.prefix("/usage"), Some(&3), "{kind}");
            assert_eq!(trie.prefix("/us"), None, "{kind}");
        });
    }

    #[test]
    fn multibyte_keys() {
        each_backend(|kind, mut trie| {
            trie.put("/caf\u{e9}", 1);
            trie.put("/caf\u{e8}s", 2);

            assert_eq!(trie.prefix("/caf\u{e9}/menu"), Some(&1), "{kind}");
            assert_eq!(trie.prefix("/caf\u{e8}s"), Some(&2), "{kind}");
            assert_eq!(trie.prefix("/caf\u{e8}"), None, "{kind}");
            assert_eq!(trie.prefix("/cafe"), None, "{kind}");
        });
    }

    #[test]
    fn display_names_parse_as_cli_values() {
        use clap::ValueEnum;

        for kind in TrieKind::ALL {
            assert_eq!(TrieKind::from_str(kind.as_str(), false), Ok(kind));
        }
        assert!(TrieKind::from_str("hashmap", false).is_err());
    }
}
