//! Serde data structures for route files.
//!
//! Contains [`RouteTable`] (the root) and [`RouteSpec`]. Both derive
//! `Serialize` and `Deserialize` with `deny_unknown_fields` for strict
//! parsing. Routes are keyed by route key in a `BTreeMap`, so iteration
//! order (and therefore the order routes reach the matcher) is stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matcher::is_wildcard;

const fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteTable {
    #[serde(default)]
    pub routes: BTreeMap<String, RouteSpec>,
}

impl RouteTable {
    #[must_use]
    pub fn wildcard_count(&self) -> usize {
        self.routes.keys().filter(|key| is_wildcard(key)).count()
    }
}

/// Where a matched request is sent. Opaque to the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub strip_prefix: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl RouteSpec {
    /// Service id or URL, whichever is set.
    #[must_use]
    pub fn target(&self) -> &str {
        self.service_id
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or("-")
    }
}
