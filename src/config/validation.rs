//! Route table validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`RouteTable`] for
//! malformed route keys (missing leading `/`, misplaced `*`) and for
//! route specs without a usable target. Returns a list of
//! [`ValidationError`] values with per-field suggestions.
//!
//! [`shadowed_routes`] reports keys that collide once normalized. These
//! are warnings: the matcher resolves them deterministically, but one of
//! the colliding routes can never match.

use std::collections::BTreeMap;

use url::Url;

use super::model::{RouteSpec, RouteTable};
use crate::error::ValidationError;
use crate::matcher::{is_wildcard, normalize, WILDCARD};

/// Validate a single route key. Returns `Ok(())` or a human-readable error.
pub fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("route key cannot be empty".into());
    }
    if !key.starts_with('/') {
        return Err("route key must start with '/'".into());
    }
    let stem = key.strip_suffix(WILDCARD).unwrap_or(key);
    if stem.contains('*') {
        return Err(format!(
            "'*' is only allowed as the trailing '{WILDCARD}' wildcard marker"
        ));
    }
    Ok(())
}

/// Validate a target URL. Returns `Ok(())` or a human-readable error.
pub fn validate_url(url: &str) -> Result<(), String> {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme != "http" && scheme != "https" {
                Err(format!(
                    "unsupported scheme '{scheme}' (expected http or https)"
                ))
            } else {
                Ok(())
            }
        }
        Err(_) => Err(format!("'{url}' is not a valid URL")),
    }
}

fn key_suggestion(key: &str) -> Option<String> {
    if !key.is_empty() && !key.starts_with('/') {
        return Some(format!("did you mean '/{key}'?"));
    }
    let stem = key.strip_suffix(WILDCARD).unwrap_or(key);
    if let Some(idx) = stem.find('*') {
        let prefix = stem[..idx].trim_end_matches('/');
        return Some(format!("did you mean '{prefix}/{WILDCARD}'?"));
    }
    None
}

fn validate_spec(key: &str, spec: &RouteSpec, errors: &mut Vec<ValidationError>) {
    match (&spec.service_id, &spec.url) {
        (None, None) => errors.push(ValidationError {
            route: key.to_string(),
            field: "service_id".into(),
            message: "either service_id or url must be set".into(),
            suggestion: None,
        }),
        (Some(_), Some(_)) => errors.push(ValidationError {
            route: key.to_string(),
            field: "url".into(),
            message: "service_id and url are mutually exclusive".into(),
            suggestion: Some("keep only one of them".into()),
        }),
        (Some(service_id), None) if service_id.trim().is_empty() => {
            errors.push(ValidationError {
                route: key.to_string(),
                field: "service_id".into(),
                message: "service_id cannot be empty".into(),
                suggestion: None,
            });
        }
        (None, Some(url)) => {
            if let Err(message) = validate_url(url) {
                errors.push(ValidationError {
                    route: key.to_string(),
                    field: "url".into(),
                    message,
                    suggestion: None,
                });
            }
        }
        (Some(_), None) => {}
    }
}

pub fn validate(table: &RouteTable) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (key, spec) in &table.routes {
        if let Err(message) = validate_key(key) {
            errors.push(ValidationError {
                route: key.clone(),
                field: "key".into(),
                message,
                suggestion: key_suggestion(key),
            });
        }
        validate_spec(key, spec, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Route keys that lose to another key normalizing to the same path.
///
/// Mirrors the matcher's collision rule: an exact route shadows a
/// wildcard route on the same path; among routes of the same kind the
/// one iterated last wins.
#[must_use]
pub fn shadowed_routes(table: &RouteTable) -> Vec<ValidationError> {
    let mut winners: BTreeMap<&str, &str> = BTreeMap::new();
    let mut warnings = Vec::new();

    for key in table.routes.keys() {
        let path = normalize(key);
        let Some(existing) = winners.get(path).copied() else {
            winners.insert(path, key);
            continue;
        };

        let (kept, dropped) = if !is_wildcard(existing) && is_wildcard(key) {
            (existing, key.as_str())
        } else {
            (key.as_str(), existing)
        };
        winners.insert(path, kept);

        let message = if is_wildcard(kept) == is_wildcard(dropped) {
            format!("collides with '{kept}' on path '{path}' and is ignored")
        } else {
            format!("shadowed by exact route '{kept}' and never matches")
        };
        warnings.push(ValidationError {
            route: dropped.to_string(),
            field: "key".into(),
            message,
            suggestion: None,
        });
    }

    warnings
}

#[must_use]
pub fn format_validation_report(path: &str, table: &RouteTable) -> String {
    let mut lines = vec![format!(
        "  {} routes, {} wildcard\n",
        table.routes.len(),
        table.wildcard_count()
    )];

    for (key, spec) in &table.routes {
        let kind = if is_wildcard(key) { "wildcard" } else { "exact" };
        lines.push(format!("  {key}  -> {} ({kind})", spec.target()));
        if !spec.strip_prefix {
            lines.push("    strip_prefix: false".into());
        }
        if let Some(retryable) = spec.retryable {
            lines.push(format!("    retryable: {retryable}"));
        }
    }

    format!("{} is valid\n{}", path, lines.join("\n"))
}
