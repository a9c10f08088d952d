//! Application layer for Kotoba.
//!
//! This crate provides the state containers the UI layer drives: the chat
//! store owning session/message lifecycle, and the settings store owning
//! validated generation settings.

pub mod chat_store;
pub mod settings_store;

pub use chat_store::ChatStore;
pub use settings_store::{SettingsStore, SETTINGS_SLOT};
