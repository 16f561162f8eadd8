//! Route table read from a local file, versioned by content hash.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{sha256_hex, RouteFormat};
use crate::config::model::RouteTable;
use crate::config::validation::validate;
use crate::config::{RouteSource, RouteVersion};
use crate::error::RouteTrieError;

pub struct FileSource {
    path: PathBuf,
    format: RouteFormat,
}

impl FileSource {
    /// Source for `path`; the format comes from its extension.
    pub fn new(path: PathBuf) -> Result<Self, RouteTrieError> {
        let format = RouteFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    async fn read_content(&self) -> Result<String, RouteTrieError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RouteTrieError::RouteFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                RouteTrieError::Io(e)
            }
        })
    }

    fn decode(
        &self,
        content: &str,
        version: RouteVersion,
    ) -> Result<(RouteTable, RouteVersion), RouteTrieError> {
        let table = self.format.parse(content, &self.path.display().to_string())?;
        validate(&table).map_err(|errors| RouteTrieError::RouteValidation { errors })?;
        Ok((table, version))
    }
}

#[async_trait]
impl RouteSource for FileSource {
    fn name(&self) -> &'static str {
        self.format.name()
    }

    async fn load(&self) -> Result<(RouteTable, RouteVersion), RouteTrieError> {
        let content = self.read_content().await?;
        let version = RouteVersion::Hash(sha256_hex(content.as_bytes()));
        self.decode(&content, version)
    }

    async fn load_if_changed(
        &self,
        current: &RouteVersion,
    ) -> Result<Option<(RouteTable, RouteVersion)>, RouteTrieError> {
        let content = self.read_content().await?;
        let version = RouteVersion::Hash(sha256_hex(content.as_bytes()));
        if version == *current {
            return Ok(None);
        }
        self.decode(&content, version).map(Some)
    }
}

#[cfg(all(test, feature = "yaml"))]
mod tests {
    use super::*;

    const USERS: &str = "routes:\n  /users/**:\n    service_id: users\n";

    #[tokio::test]
    async fn unchanged_content_is_not_reloaded() {
        let path = std::env::temp_dir().join(format!("routetrie-fs-{}.yaml", std::process::id()));
        std::fs::write(&path, USERS).unwrap();
        let source = FileSource::new(path.clone()).unwrap();

        let (table, version) = source.load().await.unwrap();
        assert_eq!(table.routes.len(), 1);
        assert_eq!(version, RouteVersion::Hash(sha256_hex(USERS.as_bytes())));
        assert!(source.load_if_changed(&version).await.unwrap().is_none());

        std::fs::write(&path, "routes: {}\n").unwrap();
        let (table, next) = source.load_if_changed(&version).await.unwrap().unwrap();
        assert!(table.routes.is_empty());
        assert_ne!(next, version);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn name_follows_the_format() {
        let source = FileSource::new(PathBuf::from("routes.yml")).unwrap();
        assert_eq!(source.name(), "yaml");
    }
}
