use serde::{Deserialize, Serialize};

/// Change notifications published by the session store.
///
/// The presentation layer subscribes to these instead of observing store
/// state directly. Events are emitted after an operation's in-memory side
/// effects have been applied; failed operations emit nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The session list was replaced, reordered, or had entries
    /// added/removed/retitled.
    SessionListChanged,
    /// The current session was opened, closed, or mutated.
    CurrentSessionChanged,
}
