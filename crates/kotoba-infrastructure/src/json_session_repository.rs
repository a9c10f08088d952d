//! JSON-file-backed SessionRepository implementation.
//!
//! Stores one pretty-printed JSON document per session. Writes are atomic:
//! the document is written to a temp file, synced, then renamed over the
//! target, so a crash mid-write never leaves a truncated session on disk.

use kotoba_core::chat::{ChatSession, SessionRepository};
use kotoba_core::error::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::paths::KotobaPaths;

/// Directory-of-JSON-files session repository.
///
/// Directory structure:
/// ```text
/// base_dir/
/// └── sessions/
///     ├── <session-id-1>.json
///     └── <session-id-2>.json
/// ```
pub struct JsonSessionRepository {
    sessions_dir: PathBuf,
}

impl JsonSessionRepository {
    /// Creates a repository at the default location (`~/.config/kotoba`).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or the directory structure cannot be created.
    pub async fn default_location() -> Result<Self> {
        let base_dir = KotobaPaths::base_dir()
            .map_err(|e| kotoba_core::KotobaError::io(e.to_string()))?;
        Self::new(base_dir).await
    }

    /// Creates a new repository rooted at `base_dir`.
    ///
    /// # Arguments
    ///
    /// * `base_dir` - Base directory for kotoba data (e.g., `~/.config/kotoba`)
    ///
    /// # Errors
    ///
    /// Returns an error if the sessions directory cannot be created.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let sessions_dir = base_dir.as_ref().join("sessions");
        fs::create_dir_all(&sessions_dir).await?;
        Ok(Self { sessions_dir })
    }

    /// Returns the directory where session files are stored.
    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        self.sessions_dir.join(format!("{session_id}.json"))
    }

    /// Writes `content` to `path` via a temp file and atomic rename.
    async fn write_atomic(path: &Path, content: &str) -> Result<()> {
        let tmp_path = path.with_extension("json.tmp");

        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(content.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for JsonSessionRepository {
    async fn list_all(&self) -> Result<Vec<ChatSession>> {
        let mut sessions = Vec::new();
        let mut entries = fs::read_dir(&self.sessions_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let content = fs::read_to_string(&path).await?;
            match serde_json::from_str::<ChatSession>(&content) {
                Ok(session) => sessions.push(session),
                Err(e) => {
                    // Unreadable entries are skipped, not fatal
                    tracing::warn!("Skipping unparsable session file {:?}: {}", path, e);
                }
            }
        }

        // Most recent first; ties broken by id so directory enumeration
        // order never leaks into the result.
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));

        Ok(sessions)
    }

    async fn find_by_id(&self, session_id: &str) -> Result<Option<ChatSession>> {
        let path = self.session_path(session_id);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    async fn save(&self, session: &ChatSession) -> Result<()> {
        let content = serde_json::to_string_pretty(session)?;
        Self::write_atomic(&self.session_path(&session.id), &content).await
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        match fs::remove_file(self.session_path(session_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear_all(&self) -> Result<()> {
        let mut entries = fs::read_dir(&self.sessions_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                fs::remove_file(&path).await?;
            }
        }
        Ok(())
    }
}
