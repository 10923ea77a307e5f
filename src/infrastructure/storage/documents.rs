//! Filesystem-backed document store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{DocumentStore, DomainError, DomainResult};
use crate::shared::errors::InfraError;

/// Stores uploaded documents as plain files under a root directory.
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> DomainResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(DomainError::Validation(format!(
                "Invalid document key: {}",
                key
            )));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> DomainResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(InfraError::from)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(InfraError::from)?;
        debug!(key = %key, size = bytes.len(), "Document stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("inside-tunisia-{}-{}", name, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn put_creates_root_and_writes_file() {
        let root = scratch_dir("docs");
        let store = LocalDocumentStore::new(&root);
        assert_eq!(store.root(), root.as_path());

        store.put("1700000000000-g-1-cv.pdf", b"%PDF-1.4").await.unwrap();

        let written = tokio::fs::read(root.join("1700000000000-g-1-cv.pdf"))
            .await
            .unwrap();
        assert_eq!(written, b"%PDF-1.4");
        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn keys_cannot_escape_the_root() {
        let store = LocalDocumentStore::new(scratch_dir("escape"));
        for key in ["../cv.pdf", "a/b.pdf", ".hidden", ""] {
            let err = store.put(key, b"x").await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "key {:?}", key);
        }
    }
}
