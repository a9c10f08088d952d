//! Chat session store.
//!
//! Single source of truth for which sessions exist and which one is open,
//! plus all message-level editing logic. The store mutates in-memory state
//! synchronously and durable-commits through the injected repository; the
//! repository calls are the only suspension points.

use kotoba_core::chat::{
    ChatMessage, ChatSession, MessageRole, SessionRepository, StoreEvent,
};
use kotoba_core::error::{KotobaError, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Maximum title length derived from the first user message, in characters.
const TITLE_MAX_CHARS: usize = 30;

/// Buffered change notifications per subscriber.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Manages the current session, the session list, and their lifecycle.
///
/// `ChatStore` is responsible for:
/// - Creating, loading, and deleting sessions
/// - Appending and editing messages on the current session
/// - Mirroring current-session mutations into the session list
/// - Persisting sessions through the injected [`SessionRepository`]
/// - Publishing [`StoreEvent`] change notifications
///
/// The store is explicitly constructed and dependency-injected; it holds no
/// global state. Mutation goes through `&mut self`, so a store has exactly
/// one logical writer. Overlapping async operations from that writer are
/// not serialized against the repository (last-writer-wins), matching the
/// single-user design.
pub struct ChatStore {
    /// Persistent storage backend for session data
    repository: Arc<dyn SessionRepository>,
    /// The session presently open for viewing/editing, if any
    current_session: Option<ChatSession>,
    /// The full known session list, ordered by last update descending
    sessions: Vec<ChatSession>,
    /// Transient UI text buffer; never persisted
    current_input: String,
    /// Cooperative hint that an AI request is in flight
    is_generating: bool,
    /// Change notification channel
    events: broadcast::Sender<StoreEvent>,
}

impl ChatStore {
    /// Creates a new `ChatStore` over the given repository backend.
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            repository,
            current_session: None,
            sessions: Vec::new(),
            current_input: String::new(),
            is_generating: false,
            events,
        }
    }

    /// Subscribes to change notifications.
    ///
    /// Only events published after this call are observed.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: StoreEvent) {
        // Send only fails when no subscriber exists, which is fine
        let _ = self.events.send(event);
    }

    // ============================================================================
    // Session lifecycle
    // ============================================================================

    /// Loads the full session list from storage, replacing the in-memory
    /// list wholesale. The current session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a load error if the repository fails.
    pub async fn load_sessions(&mut self) -> Result<()> {
        let sessions = self.repository.list_all().await.map_err(|e| {
            tracing::error!("Failed to load session list: {}", e);
            KotobaError::data_access("Failed to load the session list")
        })?;

        self.sessions = sessions;
        self.notify(StoreEvent::SessionListChanged);
        Ok(())
    }

    /// Creates a new empty session, persists it, inserts it at the front of
    /// the list, and makes it current.
    ///
    /// The new session is front-inserted rather than re-sorted: at the
    /// creation instant no other session can carry a later timestamp, an
    /// assumption that holds only for this store's single-writer model.
    ///
    /// Persistence happens first; when it fails, neither the list nor the
    /// current session is touched.
    ///
    /// # Returns
    ///
    /// The new session's ID.
    ///
    /// # Errors
    ///
    /// Returns a write error if the repository fails.
    pub async fn create_new_session(&mut self) -> Result<String> {
        let session = ChatSession::new();

        self.repository.save(&session).await.map_err(|e| {
            tracing::error!("Failed to create new session: {}", e);
            KotobaError::data_access("Failed to create a new session")
        })?;

        let id = session.id.clone();
        self.sessions.insert(0, session.clone());
        self.current_session = Some(session);
        self.notify(StoreEvent::SessionListChanged);
        self.notify(StoreEvent::CurrentSessionChanged);
        Ok(id)
    }

    /// Loads a session by ID from storage and makes it current.
    ///
    /// The session list is not touched.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the session does not exist, or a load
    /// error if the repository fails.
    pub async fn load_session(&mut self, session_id: &str) -> Result<()> {
        let session = self
            .repository
            .find_by_id(session_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load session {}: {}", session_id, e);
                KotobaError::data_access("Failed to load the session")
            })?
            .ok_or_else(|| KotobaError::not_found("session", session_id))?;

        self.current_session = Some(session);
        self.notify(StoreEvent::CurrentSessionChanged);
        Ok(())
    }

    /// Persists the current session and mirrors it into the session list.
    ///
    /// No-op when no session is open. The last-updated timestamp is bumped
    /// before the durable write and is NOT rolled back when the write
    /// fails, so a caller can observe a timestamp that was never saved;
    /// see DESIGN.md. When the current session has a list entry, the entry
    /// is replaced with a copy and the list re-sorted most-recent-first; a
    /// missing entry is tolerated.
    ///
    /// # Errors
    ///
    /// Returns a save error if the repository fails.
    pub async fn save_current_session(&mut self) -> Result<()> {
        let Some(current) = self.current_session.as_mut() else {
            return Ok(());
        };

        current.updated_at = Utc::now();
        let snapshot = current.clone();

        self.repository.save(&snapshot).await.map_err(|e| {
            tracing::error!("Failed to save session {}: {}", snapshot.id, e);
            KotobaError::data_access("Failed to save the session")
        })?;

        if let Some(entry) = self.sessions.iter_mut().find(|s| s.id == snapshot.id) {
            *entry = snapshot;
            self.sessions
                .sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            self.notify(StoreEvent::SessionListChanged);
        }
        Ok(())
    }

    /// Deletes a session from storage and from the in-memory list.
    ///
    /// When the deleted session is the current one, the current session is
    /// cleared. Storage deletion happens first; when it fails, no in-memory
    /// state changes.
    ///
    /// # Errors
    ///
    /// Returns a delete error if the repository fails.
    pub async fn delete_session(&mut self, session_id: &str) -> Result<()> {
        self.repository.delete(session_id).await.map_err(|e| {
            tracing::error!("Failed to delete session {}: {}", session_id, e);
            KotobaError::data_access("Failed to delete the session")
        })?;

        self.sessions.retain(|s| s.id != session_id);
        self.notify(StoreEvent::SessionListChanged);

        if self
            .current_session
            .as_ref()
            .is_some_and(|s| s.id == session_id)
        {
            self.current_session = None;
            self.notify(StoreEvent::CurrentSessionChanged);
        }
        Ok(())
    }

    /// Deletes every stored session and empties all in-memory session
    /// state. Storage clearing happens first; when it fails, no in-memory
    /// state changes.
    ///
    /// # Errors
    ///
    /// Returns a clear error if the repository fails.
    pub async fn clear_all_sessions(&mut self) -> Result<()> {
        self.repository.clear_all().await.map_err(|e| {
            tracing::error!("Failed to clear sessions: {}", e);
            KotobaError::data_access("Failed to clear all sessions")
        })?;

        self.sessions.clear();
        self.notify(StoreEvent::SessionListChanged);

        if self.current_session.take().is_some() {
            self.notify(StoreEvent::CurrentSessionChanged);
        }
        Ok(())
    }

    // ============================================================================
    // Message editing (in-memory only; callers persist via save_current_session)
    // ============================================================================

    /// Appends a message to the current session.
    ///
    /// No-op when no session is open. The message gets a fresh identifier
    /// and the current timestamp. When the appended message is the
    /// session's first and its role is [`MessageRole::User`], the session
    /// title is derived from the content (at most 30 characters plus an
    /// ellipsis); the title is never re-derived afterward.
    ///
    /// Does not persist.
    pub fn add_message(&mut self, role: MessageRole, content: impl Into<String>) {
        let Some(session) = self.current_session.as_mut() else {
            return;
        };

        let content = content.into();
        let is_first = session.messages.is_empty();
        session
            .messages
            .push(ChatMessage::new(role.clone(), content.clone()));

        if is_first && role == MessageRole::User {
            session.title = derive_title(&content);
        }
        self.notify(StoreEvent::CurrentSessionChanged);
    }

    /// Replaces a message's content and truncates the conversation at it.
    ///
    /// No-op when no session is open or the ID is unknown. Every message
    /// after the edited one is discarded permanently; this models
    /// re-asking the conversation from the edited point.
    ///
    /// Does not persist.
    pub fn edit_message(&mut self, message_id: &str, new_content: impl Into<String>) {
        let Some(session) = self.current_session.as_mut() else {
            return;
        };
        let Some(index) = session.messages.iter().position(|m| m.id == message_id) else {
            return;
        };

        session.messages[index].content = new_content.into();
        session.messages.truncate(index + 1);
        self.notify(StoreEvent::CurrentSessionChanged);
    }

    /// Updates a session title on the current session and in the session
    /// list, each independently and only where the ID matches. Both,
    /// either, or neither may apply.
    pub fn update_session_title(&mut self, session_id: &str, new_title: impl Into<String>) {
        let new_title = new_title.into();

        if let Some(current) = self.current_session.as_mut() {
            if current.id == session_id {
                current.title = new_title.clone();
                self.notify(StoreEvent::CurrentSessionChanged);
            }
        }

        if let Some(entry) = self.sessions.iter_mut().find(|s| s.id == session_id) {
            entry.title = new_title;
            self.notify(StoreEvent::SessionListChanged);
        }
    }

    /// Empties the current session's message sequence in memory.
    ///
    /// No-op when no session is open. No persistence, no title reset.
    pub fn clear_current_session_messages(&mut self) {
        let Some(session) = self.current_session.as_mut() else {
            return;
        };
        session.messages.clear();
        self.notify(StoreEvent::CurrentSessionChanged);
    }

    // ============================================================================
    // Transient UI state
    // ============================================================================

    /// The in-progress input text.
    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// Replaces the in-progress input text.
    pub fn set_current_input(&mut self, input: impl Into<String>) {
        self.current_input = input.into();
    }

    /// Whether an AI request is in flight. A cooperative hint only; the
    /// store does not block mutation while it is set.
    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// Sets the in-flight AI request flag.
    pub fn set_generating(&mut self, generating: bool) {
        self.is_generating = generating;
    }

    // ============================================================================
    // Derived views
    // ============================================================================

    /// The session presently open, if any.
    pub fn current_session(&self) -> Option<&ChatSession> {
        self.current_session.as_ref()
    }

    /// Whether a session is open.
    pub fn has_current_session(&self) -> bool {
        self.current_session.is_some()
    }

    /// The current session's messages, or an empty slice when none is open.
    pub fn current_messages(&self) -> &[ChatMessage] {
        self.current_session
            .as_ref()
            .map(|s| s.messages.as_slice())
            .unwrap_or(&[])
    }

    /// All known sessions, most recently updated first.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// Count of known sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Derives a session title from the first user message: the content
/// verbatim when it fits, otherwise the first [`TITLE_MAX_CHARS`]
/// characters with an ellipsis suffix.
fn derive_title(content: &str) -> String {
    if content.chars().count() > TITLE_MAX_CHARS {
        let truncated: String = content.chars().take(TITLE_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        content.to_string()
    }
}
