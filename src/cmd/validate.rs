//! `routetrie validate` — check a route file for errors.
//!
//! Parses and validates the route file, reporting results in either
//! human-readable text or machine-readable JSON format. Keys that
//! collide after normalization are reported as warnings.

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::sources::read_route_file;
use crate::config::validation;
use crate::error::{RouteTrieError, ValidationError};

fn to_json(errors: &[ValidationError]) -> Vec<serde_json::Value> {
    errors
        .iter()
        .map(|e| {
            serde_json::json!({
                "route": e.route,
                "field": e.field,
                "message": e.message,
                "suggestion": e.suggestion,
            })
        })
        .collect()
}

pub fn execute(args: &ValidateArgs) -> Result<(), RouteTrieError> {
    let path = &args.routes;
    let table = read_route_file(path)?;

    if let Err(errors) = validation::validate(&table) {
        match args.format {
            ValidateFormat::Text => {
                eprintln!("\u{2717} {} has {} errors\n", path.display(), errors.len());
                for error in &errors {
                    eprintln!("{error}");
                }
            }
            ValidateFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "valid": false,
                        "errors": to_json(&errors),
                    })
                );
            }
        }
        return Err(RouteTrieError::RouteValidation { errors });
    }

    let warnings = validation::shadowed_routes(&table);

    match args.format {
        ValidateFormat::Text => {
            println!(
                "\u{2713} {}",
                validation::format_validation_report(&path.display().to_string(), &table)
            );
            if !warnings.is_empty() {
                eprintln!("\n{} warnings\n", warnings.len());
                for warning in &warnings {
                    eprintln!("{warning}");
                }
            }
        }
        ValidateFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "valid": true,
                    "routes": table.routes.len(),
                    "wildcard": table.wildcard_count(),
                    "warnings": to_json(&warnings),
                })
            );
        }
    }

    Ok(())
}
