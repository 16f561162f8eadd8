//! Route file formats and the file-backed [`RouteSource`](super::RouteSource).
//!
//! [`RouteFormat`] is the only place that maps a file extension to a
//! serde deserializer. Both the one-shot [`read_route_file`] used by
//! `resolve`/`validate` and the polling [`FileSource`] go through it.

mod file_source;

pub use file_source::FileSource;

use std::path::Path;

use sha2::{Digest, Sha256};

use super::model::RouteTable;
use super::RouteSource;
use crate::error::RouteTrieError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type DeserializeFn = fn(&str) -> Result<RouteTable, BoxError>;

/// A route file format enabled in this build.
#[derive(Clone, Copy)]
pub struct RouteFormat {
    name: &'static str,
    deserialize: DeserializeFn,
}

impl RouteFormat {
    /// Format for a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Result<Self, RouteTrieError> {
        let (name, deserialize): (&'static str, DeserializeFn) = match ext {
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => ("yaml", from_yaml),

            #[cfg(feature = "json")]
            "json" => ("json", from_json),

            #[cfg(feature = "toml")]
            "toml" => ("toml", from_toml),

            other => return Err(RouteTrieError::UnsupportedFormat(other.to_string())),
        };
        Ok(Self { name, deserialize })
    }

    pub fn from_path(path: &Path) -> Result<Self, RouteTrieError> {
        Self::from_extension(path.extension().and_then(|e| e.to_str()).unwrap_or(""))
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Deserialize `content`; `origin` names the input in parse errors.
    pub fn parse(self, content: &str, origin: &str) -> Result<RouteTable, RouteTrieError> {
        (self.deserialize)(content).map_err(|source| RouteTrieError::RouteFileParse {
            path: origin.to_string(),
            source,
        })
    }
}

#[cfg(feature = "yaml")]
fn from_yaml(content: &str) -> Result<RouteTable, BoxError> {
    Ok(serde_yml::from_str(content)?)
}

#[cfg(feature = "json")]
fn from_json(content: &str) -> Result<RouteTable, BoxError> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(feature = "toml")]
fn from_toml(content: &str) -> Result<RouteTable, BoxError> {
    Ok(toml::from_str(content)?)
}

/// Parse a route table string based on file extension.
pub fn parse_route_table_str(
    ext: &str,
    content: &str,
    origin: &str,
) -> Result<RouteTable, RouteTrieError> {
    RouteFormat::from_extension(ext)?.parse(content, origin)
}

/// Read and parse a route file, picking the format from its extension.
///
/// Does not validate; callers decide how to report validation errors.
pub fn read_route_file(path: &Path) -> Result<RouteTable, RouteTrieError> {
    let format = RouteFormat::from_path(path)?;
    if !path.exists() {
        return Err(RouteTrieError::RouteFileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    format.parse(&content, &path.display().to_string())
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// File source for `path`, with the format picked by extension.
pub fn for_path(path: &Path) -> Result<Box<dyn RouteSource>, RouteTrieError> {
    Ok(Box::new(FileSource::new(path.to_path_buf())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_is_stable_hex() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = parse_route_table_str("ini", "", "routes.ini").unwrap_err();
        assert!(matches!(err, RouteTrieError::UnsupportedFormat(ref ext) if ext == "ini"));
        assert!(matches!(
            for_path(Path::new("routes.ini")),
            Err(RouteTrieError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_route_file(Path::new("routes")),
            Err(RouteTrieError::UnsupportedFormat(ref ext)) if ext.is_empty()
        ));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yml_is_an_alias_for_yaml() {
        assert_eq!(RouteFormat::from_extension("yml").unwrap().name(), "yaml");
        assert_eq!(
            RouteFormat::from_path(Path::new("conf/routes.yaml")).unwrap().name(),
            "yaml"
        );
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn missing_file_is_reported() {
        let err = read_route_file(Path::new("does/not/exist.yaml")).unwrap_err();
        assert!(matches!(err, RouteTrieError::RouteFileNotFound { .. }));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_table_parses() {
        let content = "routes:\n  /users/**:\n    service_id: users\n  /users/admin:\n    url: http://admin:8080\n    strip_prefix: false\n";
        let table = parse_route_table_str("yaml", content, "inline").unwrap();
        assert_eq!(table.routes.len(), 2);
        assert!(!table.routes["/users/admin"].strip_prefix);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_parse_error_names_the_file() {
        let err = parse_route_table_str("yaml", "routes: [", "broken.yaml").unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }
}
