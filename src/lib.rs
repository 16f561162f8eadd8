//! routetrie resolves request paths to configured routes with a prefix trie.
//!
//! Routes are keyed by path. A key ending in `**` is a wildcard route and
//! matches every path sharing its prefix; any other key matches only the
//! identical path. The whole route table is rebuilt into a fresh trie on
//! every change and published atomically, so lookups never take a lock
//! and never see a partially built table.
//!
//! ```
//! use routetrie::matcher::TrieRouteMatcher;
//! use routetrie::trie::TrieKind;
//!
//! let matcher = TrieRouteMatcher::new(TrieKind::Radix);
//! matcher.set_routes([("/users/**", "users"), ("/users/admin", "admin")]);
//!
//! let resolve = |path: &str| matcher.get_matching_route(path).unwrap().map(|spec| *spec);
//! assert_eq!(resolve("/users/42"), Some("users"));
//! assert_eq!(resolve("/users/admin"), Some("admin"));
//! assert_eq!(resolve("/orders"), None);
//! ```
//!
//! # Architecture
//!
//! - [`trie`] -- The [`Trie`](trie::Trie) storage contract, the
//!   [`TrieFactory`](trie::TrieFactory) seam and three backends.
//! - [`matcher`] -- [`TrieRouteMatcher`](matcher::TrieRouteMatcher): build,
//!   publish and resolve against the current route trie.
//! - [`config`] -- Route file model, validation, and file sources with
//!   change detection via the [`RouteSource`](config::RouteSource) trait.
//! - [`reload`] -- Polling hot reload from a route source into a matcher.
//! - [`cli`] -- Command-line interface parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (resolve, validate, watch).
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML route files _(enabled by default)_ |
//! | `json` | JSON route files |
//! | `toml` | TOML route files |
//! | `file-backends` | All route file formats |
//! | `full` | All features |

#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod reload;
pub mod trie;
