//! `routetrie watch` — resolve paths from stdin with hot reload.
//!
//! Loads the route file, then spawns a [`Reloader`] loop that polls the
//! file and republishes the table when its hash changes. Meanwhile each
//! line read from stdin is resolved against whichever table is current.
//! Stops at end of input or on Ctrl-C.

use std::future::Future;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use super::resolve::render;
use crate::cli::WatchArgs;
use crate::config::model::RouteSpec;
use crate::config::sources;
use crate::error::RouteTrieError;
use crate::logging;
use crate::matcher::TrieRouteMatcher;
use crate::reload::Reloader;
use crate::trie::TrieFactory;

type Lines = mpsc::Receiver<std::io::Result<String>>;

pub async fn execute(args: WatchArgs) -> Result<(), RouteTrieError> {
    let log_format = logging::resolve_format(args.logging.pretty, args.logging.json_logs);
    logging::init(&args.logging.log_level, log_format);

    let source = sources::for_path(&args.routes)?;
    let matcher = Arc::new(TrieRouteMatcher::new(args.matcher.trie));
    let mut reloader = Reloader::new(Arc::clone(&matcher), source);
    let route_count = reloader.load().await?;

    tracing::info!(
        path = %args.routes.display(),
        source = reloader.source_name(),
        routes = route_count,
        trie = %args.matcher.trie,
        poll_interval = args.poll_interval,
        "watching route file"
    );

    // Dropping or signalling shutdown_tx stops the reload loop
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let interval = Duration::from_secs(args.poll_interval.max(1));
    let reload_handle = tokio::spawn(reloader.run(interval, shutdown_rx));

    let lines = spawn_stdin_reader()?;
    let result = resolve_lines(&matcher, lines, tokio::io::stdout(), args.json, ctrl_c()).await;

    let _ = shutdown_tx.send(true);
    if let Err(e) = reload_handle.await {
        tracing::error!(error = %e, "route reload task failed");
    }

    result.map(|count| tracing::info!(resolved = count, "watch stopped"))
}

/// Read stdin lines on a detached OS thread.
///
/// Tokio's stdin blocks runtime shutdown until the pending read returns;
/// this thread is never joined, so Ctrl-C exits right away.
fn spawn_stdin_reader() -> std::io::Result<Lines> {
    let (tx, rx) = mpsc::channel(64);
    std::thread::Builder::new()
        .name("stdin-lines".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        })?;
    Ok(rx)
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Resolve every non-blank line from `lines`, writing one decision per
/// line to `out`, until the input ends or `shutdown` completes.
/// Returns the number of paths resolved.
pub async fn resolve_lines<F, W>(
    matcher: &TrieRouteMatcher<RouteSpec, F>,
    mut lines: Lines,
    mut out: W,
    json: bool,
    shutdown: impl Future<Output = ()>,
) -> Result<usize, RouteTrieError>
where
    F: TrieFactory,
    W: AsyncWrite + Unpin,
{
    tokio::pin!(shutdown);
    let mut resolved = 0;

    loop {
        let line = tokio::select! {
            line = lines.recv() => line,
            () = &mut shutdown => {
                tracing::info!("interrupted");
                break;
            }
        };
        let Some(line) = line else {
            tracing::debug!("input closed");
            break;
        };

        let line = line?;
        let path = line.trim();
        if path.is_empty() {
            continue;
        }

        let found = matcher.find_route(path)?;
        let mut rendered = render(path, found.as_ref(), json);
        rendered.push('\n');
        out.write_all(rendered.as_bytes()).await?;
        out.flush().await?;
        resolved += 1;
    }

    Ok(resolved)
}
