//! `routetrie resolve` — resolve request paths against a route file.
//!
//! Loads and validates the route file, publishes it into a fresh
//! matcher, and prints one routing decision per path. Unmatched paths
//! are reported, not treated as failures.

use crate::cli::ResolveArgs;
use crate::config::model::RouteSpec;
use crate::config::sources::read_route_file;
use crate::config::validation;
use crate::error::RouteTrieError;
use crate::logging;
use crate::matcher::{RouteMatch, TrieRouteMatcher};

pub fn execute(args: &ResolveArgs) -> Result<(), RouteTrieError> {
    let log_format = logging::resolve_format(args.logging.pretty, args.logging.json_logs);
    logging::init(&args.logging.log_level, log_format);

    let table = read_route_file(&args.routes)?;
    if let Err(errors) = validation::validate(&table) {
        return Err(RouteTrieError::RouteValidation { errors });
    }

    let matcher = TrieRouteMatcher::new(args.matcher.trie);
    matcher.set_routes(table.routes);
    tracing::debug!(
        routes = %args.routes.display(),
        trie = %args.matcher.trie,
        "route table loaded"
    );

    for path in &args.paths {
        let found = matcher.find_route(path)?;
        println!("{}", render(path, found.as_ref(), args.json));
    }

    Ok(())
}

/// Format one routing decision as a text line or a JSON object.
#[must_use]
pub fn render(path: &str, found: Option<&RouteMatch<RouteSpec>>, json: bool) -> String {
    match (found, json) {
        (Some(m), false) => {
            let kind = if m.wildcard { "wildcard" } else { "exact" };
            format!("{path}  -> {} via {} ({kind})", m.spec.target(), m.key)
        }
        (None, false) => format!("{path}  -> no route"),
        (Some(m), true) => serde_json::json!({
            "path": path,
            "matched": true,
            "route": &*m.key,
            "wildcard": m.wildcard,
            "spec": &*m.spec,
        })
        .to_string(),
        (None, true) => serde_json::json!({
            "path": path,
            "matched": false,
        })
        .to_string(),
    }
}
