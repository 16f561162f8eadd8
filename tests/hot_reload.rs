//! Integration tests for polling hot reload from a route file.
#![cfg(feature = "yaml")]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use routetrie::config::model::RouteSpec;
use routetrie::config::sources::FileSource;
use routetrie::error::RouteTrieError;
use routetrie::matcher::TrieRouteMatcher;
use routetrie::reload::Reloader;

struct TempRoutes(PathBuf);

impl TempRoutes {
    fn new(name: &str, content: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "routetrie-{}-{name}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        Self(path)
    }

    fn write(&self, content: &str) {
        std::fs::write(&self.0, content).unwrap();
    }
}

impl Drop for TempRoutes {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

const V1: &str = "routes:\n  /users/**:\n    service_id: users\n";
const V2: &str = "routes:\n  /orders/**:\n    service_id: orders\n";

fn target(matcher: &TrieRouteMatcher<RouteSpec>, path: &str) -> Option<String> {
    matcher
        .get_matching_route(path)
        .unwrap()
        .map(|spec| spec.target().to_string())
}

fn reloader(file: &TempRoutes) -> (Arc<TrieRouteMatcher<RouteSpec>>, Reloader) {
    let matcher = Arc::new(TrieRouteMatcher::default());
    let reloader = Reloader::new(Arc::clone(&matcher), Box::new(FileSource::new(file.0.clone()).unwrap()));
    (matcher, reloader)
}

#[tokio::test]
async fn poll_publishes_only_changed_content() {
    let file = TempRoutes::new("poll", V1);
    let (matcher, mut reloader) = reloader(&file);

    assert!(!matcher.is_ready());
    assert!(reloader.poll().await.unwrap());
    assert_eq!(target(&matcher, "/users/1").as_deref(), Some("users"));

    assert!(!reloader.poll().await.unwrap());
    assert_eq!(matcher.snapshot().unwrap().revision(), 1);

    file.write(V2);
    assert!(reloader.poll().await.unwrap());
    assert_eq!(target(&matcher, "/users/1"), None);
    assert_eq!(target(&matcher, "/orders/1").as_deref(), Some("orders"));
    assert_eq!(matcher.snapshot().unwrap().revision(), 2);
}

#[tokio::test]
async fn failed_reload_keeps_current_routes() {
    let file = TempRoutes::new("broken", V1);
    let (matcher, mut reloader) = reloader(&file);
    assert_eq!(reloader.load().await.unwrap(), 1);

    file.write("routes: [");
    let err = reloader.poll().await.unwrap_err();
    assert!(matches!(err, RouteTrieError::RouteFileParse { .. }));
    assert_eq!(target(&matcher, "/users/1").as_deref(), Some("users"));

    file.write("routes:\n  users/**:\n    service_id: users\n");
    let err = reloader.poll().await.unwrap_err();
    assert!(matches!(err, RouteTrieError::RouteValidation { .. }));
    assert_eq!(target(&matcher, "/users/1").as_deref(), Some("users"));

    std::fs::remove_file(&file.0).unwrap();
    let err = reloader.poll().await.unwrap_err();
    assert!(matches!(err, RouteTrieError::RouteFileNotFound { .. }));
    assert_eq!(matcher.snapshot().unwrap().revision(), 1);
}

#[tokio::test]
async fn run_loop_reloads_until_shutdown() {
    let file = TempRoutes::new("loop", V1);
    let (matcher, mut reloader) = reloader(&file);
    reloader.load().await.unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let handle = tokio::spawn(reloader.run(Duration::from_millis(20), shutdown_rx));

    file.write(V2);
    let reloaded = tokio::time::timeout(Duration::from_secs(5), async {
        while target(&matcher, "/orders/1").is_none() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(reloaded.is_ok(), "route file change was not picked up");

    shutdown_tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("reload loop did not stop")
        .unwrap();
}
