//! In-memory artifact store for testing.
//!
//! Thread-safe via `RwLock`. Not suitable for production.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use bytes::Bytes;

use super::ArtifactStore;
use crate::error::{Error, Result};

/// Artifact store keeping uploaded objects in a map.
#[derive(Debug, Default)]
pub struct InMemoryArtifactStore {
    objects: RwLock<HashMap<String, Bytes>>,
}

/// Converts a lock poison error to a storage error.
fn poison_err<T>(_: PoisonError<T>) -> Error {
    Error::storage("artifact store lock poisoned")
}

impl InMemoryArtifactStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored object for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let objects = self.objects.read().map_err(poison_err)?;
        Ok(objects.get(key).cloned())
    }

    /// Returns all stored keys, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn keys(&self) -> Result<Vec<String>> {
        let objects = self.objects.read().map_err(poison_err)?;
        let mut keys: Vec<_> = objects.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Returns the number of stored objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        let objects = self.objects.read().map_err(poison_err)?;
        Ok(objects.len())
    }

    /// Returns true if nothing has been uploaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn put_file(&self, key: &str, path: &Path) -> Result<()> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            Error::storage_with_source(format!("failed to read {}", path.display()), e)
        })?;

        let mut objects = self.objects.write().map_err(poison_err)?;
        objects.insert(key.to_string(), Bytes::from(data));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[tokio::test]
    async fn put_file_stores_contents() -> Result<()> {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("result.json");
        let mut file = std::fs::File::create(&path).expect("create file");
        file.write_all(b"{\"passed\":true}").expect("write");

        let store = InMemoryArtifactStore::new();
        store.put_file("v1/result.json", &path).await?;

        assert_eq!(store.keys()?, vec!["v1/result.json".to_string()]);
        assert_eq!(
            store.get("v1/result.json")?.expect("stored"),
            Bytes::from_static(b"{\"passed\":true}")
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_storage_error() {
        let store = InMemoryArtifactStore::new();
        let err = store
            .put_file("k", Path::new("/no/such/file"))
            .await
            .expect_err("missing file");
        assert!(matches!(err, Error::Storage { .. }));
    }
}
