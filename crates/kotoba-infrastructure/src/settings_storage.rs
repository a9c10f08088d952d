//! File-backed flat key-value settings storage.
//!
//! A single JSON file holding a string-to-string map. Small enough that
//! every write re-reads, updates, and atomically rewrites the whole file.

use kotoba_core::error::Result;
use kotoba_core::settings::SettingsStorage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Flat key-value string store persisted to `<base>/settings.json`.
pub struct FileSettingsStorage {
    file_path: PathBuf,
}

impl FileSettingsStorage {
    /// Creates a storage rooted at `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_dir` cannot be created.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        fs::create_dir_all(base_dir.as_ref()).await?;
        Ok(Self {
            file_path: base_dir.as_ref().join("settings.json"),
        })
    }

    async fn load_map(&self) -> Result<HashMap<String, String>> {
        let content = match fs::read_to_string(&self.file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        let map = serde_json::from_str(&content)?;
        Ok(map)
    }

    async fn save_map(&self, map: &HashMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(map)?;
        let tmp_path = self.file_path.with_extension("json.tmp");

        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(content.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.file_path).await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStorage for FileSettingsStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.load_map().await?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.save_map(&map).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSettingsStorage::new(temp_dir.path()).await.unwrap();

        assert_eq!(storage.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSettingsStorage::new(temp_dir.path()).await.unwrap();

        storage.set("slot", "{\"a\":1}").await.unwrap();
        assert_eq!(
            storage.get("slot").await.unwrap(),
            Some("{\"a\":1}".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_replaces_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSettingsStorage::new(temp_dir.path()).await.unwrap();

        storage.set("slot", "first").await.unwrap();
        storage.set("slot", "second").await.unwrap();
        assert_eq!(storage.get("slot").await.unwrap(), Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let storage = FileSettingsStorage::new(temp_dir.path()).await.unwrap();
            storage.set("slot", "persisted").await.unwrap();
        }

        let reopened = FileSettingsStorage::new(temp_dir.path()).await.unwrap();
        assert_eq!(
            reopened.get("slot").await.unwrap(),
            Some("persisted".to_string())
        );
    }
}
