//! File-backed key-value store.
//!
//! Client state is a flat JSON object in a single file, by default
//! `paperwall/state.json` under the user configuration directory. Every
//! operation reads and rewrites the whole document; the handful of keys the
//! client persists makes that cheap.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use paperwall_application::ports::{KeyValueStore, StorageError};

/// Durable key-value store over a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store over the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store at the default location under the user configuration
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform reports no configuration directory.
    pub fn default_location() -> Result<Self, StorageError> {
        let base = dirs::config_dir().ok_or_else(|| {
            StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no user configuration directory",
            ))
        })?;
        Ok(Self::new(base.join("paperwall").join("state.json")))
    }

    /// The file this store writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn store(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(map)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, bytes).await.map_err(StorageError::Io)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.load().await?;
        map.insert(key.to_string(), value.to_string());
        self.store(&map).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.load().await?;
        if map.remove(key).is_some() {
            self.store(&map).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("nested").join("state.json"))
    }

    #[tokio::test]
    async fn test_get_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("admin_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("admin_token", "secret").await.unwrap();
        store.set("selected_mkt", "en-US").await.unwrap();
        assert_eq!(
            store.get("admin_token").await.unwrap(),
            Some("secret".to_string())
        );

        store.remove("admin_token").await.unwrap();
        assert_eq!(store.get("admin_token").await.unwrap(), None);
        // Other keys survive.
        assert_eq!(
            store.get("selected_mkt").await.unwrap(),
            Some("en-US".to_string())
        );
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).set("selected_mkt", "ja-JP").await.unwrap();

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.get("selected_mkt").await.unwrap(),
            Some("ja-JP".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_absent_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.remove("never_set").await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let store = FileStore::new(path);
        assert!(matches!(
            store.get("admin_token").await,
            Err(StorageError::Serialization(_))
        ));
    }
}
