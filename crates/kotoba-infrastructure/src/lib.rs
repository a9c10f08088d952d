pub mod gemini_client;
pub mod json_session_repository;
pub mod paths;
pub mod settings_storage;

pub use crate::gemini_client::GeminiClient;
pub use crate::json_session_repository::JsonSessionRepository;
pub use crate::settings_storage::FileSettingsStorage;
