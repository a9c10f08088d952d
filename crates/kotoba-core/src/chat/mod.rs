//! Chat domain module.
//!
//! This module contains the chat-related domain models, the repository
//! interface for session persistence, and the change notification events
//! published by the session store.
//!
//! # Module Structure
//!
//! - `model`: Core chat session domain model (`ChatSession`)
//! - `message`: Conversation message types (`MessageRole`, `ChatMessage`)
//! - `event`: Store change notifications (`StoreEvent`)
//! - `repository`: Repository trait for session persistence

mod event;
mod message;
mod model;
mod repository;

// Re-export public API
pub use event::StoreEvent;
pub use message::{ChatMessage, MessageRole};
pub use model::{ChatSession, DEFAULT_SESSION_TITLE};
pub use repository::SessionRepository;
