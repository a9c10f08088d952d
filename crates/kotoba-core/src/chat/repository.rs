//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::ChatSession;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing session persistence.
///
/// This trait defines the contract for persisting and retrieving sessions,
/// decoupling the application's core logic from the specific storage
/// mechanism (e.g., JSON files, database, remote API).
///
/// All operations are asynchronous and may fail when the underlying store
/// is unavailable. Callers translate those failures into domain-level
/// errors; implementations do not retry.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Lists all stored sessions.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ChatSession>)`: All stored sessions, ordered by last-updated
    ///   timestamp descending. Ties are broken deterministically by the store.
    /// - `Err(_)`: Error occurred during listing
    async fn list_all(&self) -> Result<Vec<ChatSession>>;

    /// Finds a session by its ID.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The ID of the session to find
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ChatSession))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, session_id: &str) -> Result<Option<ChatSession>>;

    /// Saves a session to storage, inserting or replacing by ID.
    ///
    /// # Arguments
    ///
    /// * `session` - The session to save
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Session saved successfully
    /// - `Err(_)`: Error occurred during save
    async fn save(&self, session: &ChatSession) -> Result<()>;

    /// Deletes a session from storage.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The ID of the session to delete
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Session deleted successfully (or didn't exist)
    /// - `Err(_)`: Error occurred during deletion
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Deletes every stored session.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Store cleared successfully
    /// - `Err(_)`: Error occurred during clearing
    async fn clear_all(&self) -> Result<()>;
}
