//! Generation settings store.
//!
//! Holds the validated settings record in memory and persists it to a flat
//! key-value slot. Loading is deliberately forgiving: anything wrong with
//! the stored payload falls back to defaults rather than failing, while
//! saving surfaces errors like the session store does.

use kotoba_core::error::{KotobaError, Result};
use kotoba_core::settings::{GenerationSettings, SettingsStorage};
use std::sync::Arc;

/// Storage slot holding the serialized settings record.
pub const SETTINGS_SLOT: &str = "generation-settings";

/// Manages user-adjustable generation settings.
///
/// `SettingsStore` is responsible for:
/// - Loading the persisted record, validated wholesale
/// - Persisting the current record
/// - Per-field updates that ignore out-of-range values
/// - Resetting to defaults
///
/// Unlike the session store, individual setters never fail: an
/// out-of-range value leaves the field unchanged.
pub struct SettingsStore {
    /// Flat key-value backend for the serialized record
    storage: Arc<dyn SettingsStorage>,
    /// Current settings values
    settings: GenerationSettings,
}

impl SettingsStore {
    /// Creates a new `SettingsStore` with default values over the given
    /// storage backend.
    pub fn new(storage: Arc<dyn SettingsStorage>) -> Self {
        Self {
            storage,
            settings: GenerationSettings::default(),
        }
    }

    /// The current settings values.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Loads settings from storage.
    ///
    /// A missing slot, malformed payload, out-of-range field, or storage
    /// failure all leave the defaults in place. A payload is applied only
    /// when it deserializes completely and every field is in range; a
    /// partially valid payload is rejected wholesale.
    pub async fn load(&mut self) {
        let raw = match self.storage.get(SETTINGS_SLOT).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!("Failed to read settings, keeping defaults: {}", e);
                return;
            }
        };

        match serde_json::from_str::<GenerationSettings>(&raw) {
            Ok(loaded) if loaded.is_valid() => {
                self.settings = loaded;
            }
            Ok(_) => {
                tracing::warn!("Stored settings out of range, keeping defaults");
            }
            Err(e) => {
                tracing::warn!("Stored settings malformed, keeping defaults: {}", e);
            }
        }
    }

    /// Persists the current settings to storage.
    ///
    /// # Errors
    ///
    /// Returns a save error if serialization or the storage write fails.
    pub async fn save(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.settings).map_err(|e| {
            tracing::error!("Failed to serialize settings: {}", e);
            KotobaError::data_access("Failed to save settings")
        })?;

        self.storage.set(SETTINGS_SLOT, &raw).await.map_err(|e| {
            tracing::error!("Failed to write settings: {}", e);
            KotobaError::data_access("Failed to save settings")
        })
    }

    /// Sets the sampling temperature. Out-of-range values are ignored.
    pub fn update_temperature(&mut self, value: f64) {
        if GenerationSettings::temperature_in_range(value) {
            self.settings.temperature = value;
        }
    }

    /// Sets the output token limit. Out-of-range values are ignored.
    pub fn update_max_output_tokens(&mut self, value: u32) {
        if GenerationSettings::max_output_tokens_in_range(value) {
            self.settings.max_output_tokens = value;
        }
    }

    /// Sets the top-p mass. Out-of-range values are ignored.
    pub fn update_top_p(&mut self, value: f64) {
        if GenerationSettings::top_p_in_range(value) {
            self.settings.top_p = value;
        }
    }

    /// Sets the top-k cutoff. Out-of-range values are ignored.
    pub fn update_top_k(&mut self, value: u32) {
        if GenerationSettings::top_k_in_range(value) {
            self.settings.top_k = value;
        }
    }

    /// Restores all defaults unconditionally.
    pub fn reset(&mut self) {
        self.settings = GenerationSettings::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Mock SettingsStorage for testing
    struct MockSettingsStorage {
        values: Mutex<HashMap<String, String>>,
    }

    impl MockSettingsStorage {
        fn new() -> Self {
            Self {
                values: Mutex::new(HashMap::new()),
            }
        }

        fn with_slot(raw: &str) -> Self {
            let storage = Self::new();
            storage
                .values
                .lock()
                .unwrap()
                .insert(SETTINGS_SLOT.to_string(), raw.to_string());
            storage
        }
    }

    #[async_trait::async_trait]
    impl SettingsStorage for MockSettingsStorage {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    // Storage whose every operation fails
    struct FailingSettingsStorage;

    #[async_trait::async_trait]
    impl SettingsStorage for FailingSettingsStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(KotobaError::io("disk unavailable"))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(KotobaError::io("disk unavailable"))
        }
    }

    #[tokio::test]
    async fn test_load_applies_fully_valid_payload() {
        let raw = r#"{"temperature":0.9,"maxOutputTokens":4096,"topP":0.5,"topK":20}"#;
        let mut store = SettingsStore::new(Arc::new(MockSettingsStorage::with_slot(raw)));

        store.load().await;

        assert_eq!(store.settings().temperature, 0.9);
        assert_eq!(store.settings().max_output_tokens, 4096);
        assert_eq!(store.settings().top_p, 0.5);
        assert_eq!(store.settings().top_k, 20);
    }

    #[tokio::test]
    async fn test_load_rejects_out_of_range_payload_wholesale() {
        // temperature out of range invalidates the whole record
        let raw = r#"{"temperature":3,"maxOutputTokens":2000,"topP":0.8,"topK":40}"#;
        let mut store = SettingsStore::new(Arc::new(MockSettingsStorage::with_slot(raw)));

        store.load().await;

        assert_eq!(*store.settings(), GenerationSettings::default());
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_payload() {
        let mut store = SettingsStore::new(Arc::new(MockSettingsStorage::with_slot("{oops")));
        store.load().await;
        assert_eq!(*store.settings(), GenerationSettings::default());
    }

    #[tokio::test]
    async fn test_load_missing_slot_keeps_defaults() {
        let mut store = SettingsStore::new(Arc::new(MockSettingsStorage::new()));
        store.load().await;
        assert_eq!(*store.settings(), GenerationSettings::default());
    }

    #[tokio::test]
    async fn test_load_storage_failure_degrades_to_defaults() {
        let mut store = SettingsStore::new(Arc::new(FailingSettingsStorage));
        store.load().await;
        assert_eq!(*store.settings(), GenerationSettings::default());
    }

    #[tokio::test]
    async fn test_save_and_reload_round_trip() {
        let storage = Arc::new(MockSettingsStorage::new());
        let mut store = SettingsStore::new(storage.clone());
        store.update_temperature(1.5);
        store.update_top_k(7);
        store.save().await.unwrap();

        let mut reloaded = SettingsStore::new(storage);
        reloaded.load().await;
        assert_eq!(reloaded.settings().temperature, 1.5);
        assert_eq!(reloaded.settings().top_k, 7);
    }

    #[tokio::test]
    async fn test_save_failure_surfaces_error() {
        let store = SettingsStore::new(Arc::new(FailingSettingsStorage));
        let err = store.save().await.unwrap_err();
        assert!(err.is_data_access());
    }

    #[tokio::test]
    async fn test_out_of_range_setter_is_noop() {
        let mut store = SettingsStore::new(Arc::new(MockSettingsStorage::new()));

        store.update_temperature(5.0);
        store.update_max_output_tokens(0);
        store.update_top_p(-0.1);
        store.update_top_k(101);

        assert_eq!(*store.settings(), GenerationSettings::default());
    }

    #[tokio::test]
    async fn test_in_range_setters_apply() {
        let mut store = SettingsStore::new(Arc::new(MockSettingsStorage::new()));

        store.update_temperature(2.0);
        store.update_max_output_tokens(8192);
        store.update_top_p(0.0);
        store.update_top_k(1);

        assert_eq!(store.settings().temperature, 2.0);
        assert_eq!(store.settings().max_output_tokens, 8192);
        assert_eq!(store.settings().top_p, 0.0);
        assert_eq!(store.settings().top_k, 1);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let mut store = SettingsStore::new(Arc::new(MockSettingsStorage::new()));
        store.update_temperature(1.9);
        store.reset();
        assert_eq!(*store.settings(), GenerationSettings::default());
    }
}
