//! Generation settings domain module.
//!
//! - `model`: Bounded numeric settings record (`GenerationSettings`)
//! - `storage`: Flat key-value storage trait (`SettingsStorage`)

mod model;
mod storage;

pub use model::GenerationSettings;
pub use storage::SettingsStorage;
