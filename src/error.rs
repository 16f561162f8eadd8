//! Unified error types for routetrie.
//!
//! Defines [`RouteTrieError`] (the main crate error enum) and
//! [`ValidationError`] for route table validation failures. Error
//! messages include contextual hints to guide the user toward a fix.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub route: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  route {}: {}: {}", self.route, self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RouteTrieError {
    #[error("Route matcher is not ready: no routes have been set yet")]
    NotReady,

    #[error("Route file not found: {}", path.display())]
    RouteFileNotFound { path: PathBuf },

    #[error("Route file parse error in {path}:\n  {source}")]
    RouteFileParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Route table validation failed:\n{}", format_errors(.errors))]
    RouteValidation { errors: Vec<ValidationError> },

    #[error("Unsupported route file format: '{0}'")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_render_with_suggestion() {
        let err = RouteTrieError::RouteValidation {
            errors: vec![
                ValidationError {
                    route: "api/**".into(),
                    field: "key".into(),
                    message: "route key must start with '/'".into(),
                    suggestion: Some("did you mean '/api/**'?".into()),
                },
                ValidationError {
                    route: "/a".into(),
                    field: "url".into(),
                    message: "'x' is not a valid URL".into(),
                    suggestion: None,
                },
            ],
        };

        let rendered = err.to_string();
        assert!(rendered.starts_with("Route table validation failed:\n"));
        assert!(rendered.contains("route api/**: key: route key must start with '/' (did you mean '/api/**'?)"));
        assert!(rendered.ends_with("route /a: url: 'x' is not a valid URL"));
    }
}
