//! Chat session domain model.
//!
//! This module contains the core ChatSession entity that represents
//! a single conversation thread in the application's domain layer.

use super::message::ChatMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder title given to a session before its first user message.
pub const DEFAULT_SESSION_TITLE: &str = "New chat";

/// Represents a single conversation thread in the application's domain layer.
///
/// A session contains:
/// - An ordered message sequence (insertion order = conversation order,
///   append-only except for edit-triggered truncation)
/// - A title, either user-edited or auto-derived from the first user message
/// - Timestamps for creation and last update
/// - An editability flag, reserved for future read-only/shared sessions
///
/// The session is the unit of persistence: repositories store, retrieve,
/// and delete whole sessions keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable session title
    pub title: String,
    /// Ordered conversation messages
    pub messages: Vec<ChatMessage>,
    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the session was last updated
    pub updated_at: DateTime<Utc>,
    /// Whether the session accepts edits. Always true in the current scope.
    pub is_editable: bool,
}

impl ChatSession {
    /// Creates an empty session with a fresh identifier and the placeholder
    /// title. Both timestamps are set to the creation instant.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            is_editable: true,
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty_with_equal_timestamps() {
        let session = ChatSession::new();
        assert!(session.messages.is_empty());
        assert_eq!(session.title, DEFAULT_SESSION_TITLE);
        assert_eq!(session.created_at, session.updated_at);
        assert!(session.is_editable);
    }

    #[test]
    fn test_new_sessions_have_distinct_ids() {
        assert_ne!(ChatSession::new().id, ChatSession::new().id);
    }

    #[test]
    fn test_serializes_camel_case() {
        let session = ChatSession::new();
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"isEditable\""));
    }
}
