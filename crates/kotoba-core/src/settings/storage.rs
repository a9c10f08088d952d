//! Settings storage trait.

use crate::error::Result;
use async_trait::async_trait;

/// A flat local key-value string store for small configuration records.
///
/// The settings store keeps its serialized record in a single named slot.
/// Implementations may back this with a file, a browser-style local store,
/// or an in-memory map in tests.
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: Slot present
    /// - `Ok(None)`: Slot absent
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Value written successfully
    /// - `Err(_)`: Error occurred during write
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
