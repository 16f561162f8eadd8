//! Hot reload of the route table from a [`RouteSource`].
//!
//! [`Reloader`] owns the source and the version it last published.
//! [`Reloader::poll`] asks the source for a table newer than that version
//! and, if there is one, pushes it into the matcher.
//! A failed reload leaves the previously published table in place.

use std::sync::Arc;
use std::time::Duration;

use crate::config::model::{RouteSpec, RouteTable};
use crate::config::{RouteSource, RouteVersion};
use crate::error::RouteTrieError;
use crate::matcher::TrieRouteMatcher;
use crate::trie::{TrieFactory, TrieKind};

pub struct Reloader<F = TrieKind> {
    matcher: Arc<TrieRouteMatcher<RouteSpec, F>>,
    source: Box<dyn RouteSource>,
    version: Option<RouteVersion>,
}

impl<F: TrieFactory> Reloader<F> {
    #[must_use]
    pub fn new(matcher: Arc<TrieRouteMatcher<RouteSpec, F>>, source: Box<dyn RouteSource>) -> Self {
        Self {
            matcher,
            source,
            version: None,
        }
    }

    /// Load the source unconditionally and publish it. Returns the number
    /// of routes in the new table.
    pub async fn load(&mut self) -> Result<usize, RouteTrieError> {
        let loaded = self.source.load().await?;
        Ok(self.publish(loaded))
    }

    /// Reload if the source changed since the last publish.
    ///
    /// Returns `Ok(true)` when a new table was published.
    pub async fn poll(&mut self) -> Result<bool, RouteTrieError> {
        let Some(current) = self.version.clone() else {
            self.load().await?;
            return Ok(true);
        };

        let Some(loaded) = self.source.load_if_changed(&current).await? else {
            return Ok(false);
        };

        tracing::info!(source = self.source.name(), "route change detected, reloading");
        self.publish(loaded);
        Ok(true)
    }

    /// Poll every `interval` until `shutdown` fires or its sender is dropped.
    pub async fn run(mut self, interval: Duration, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await; // Skip first immediate tick

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.changed() => {
                    tracing::debug!("route reload loop shutting down");
                    return;
                }
            }

            match self.poll().await {
                Ok(true) => {
                    let revision = self.matcher.snapshot().map_or(0, |s| s.revision());
                    tracing::info!(revision, "routes reloaded");
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(error = %e, "route reload failed, keeping current routes");
                }
            }
        }
    }

    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    fn publish(&mut self, (table, version): (RouteTable, RouteVersion)) -> usize {
        let count = table.routes.len();
        self.matcher.set_routes(table.routes);
        self.version = Some(version);
        count
    }
}
