//! Route table loading and validation.
//!
//! Defines the [`RouteSource`] trait for pluggable route table backends
//! and the [`RouteVersion`] enum for change detection. Submodules
//! provide the data model, validation logic, and the file-backed source.

pub mod model;
pub mod sources;
pub mod validation;

use async_trait::async_trait;

use crate::error::RouteTrieError;
use model::RouteTable;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RouteVersion {
    Hash(String),
}

// async_trait is required here because RouteSource is used as Box<dyn RouteSource>
// and native async fn in traits does not support dyn dispatch.
#[async_trait]
pub trait RouteSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Load, validate and version the current route table.
    async fn load(&self) -> Result<(RouteTable, RouteVersion), RouteTrieError>;

    /// Like [`load`](Self::load), but returns `Ok(None)` when the source
    /// still holds `current`. A changed source is read only once.
    async fn load_if_changed(
        &self,
        current: &RouteVersion,
    ) -> Result<Option<(RouteTable, RouteVersion)>, RouteTrieError>;
}
