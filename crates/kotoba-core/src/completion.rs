//! AI completion client trait.
//!
//! The session store never calls this itself: the UI layer invokes the
//! client around `is_generating`/`add_message` on the store. It lives here
//! so application and infrastructure code share one contract.

use crate::error::Result;
use crate::settings::GenerationSettings;
use async_trait::async_trait;

/// A client for a generative text model.
///
/// Implementations wrap a third-party API. There is no retry or timeout
/// policy at this seam; once issued, a request runs to completion or
/// failure.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generates a response for `prompt` using the given settings.
    ///
    /// # Returns
    ///
    /// - `Ok(text)`: The generated response text
    /// - `Err(_)`: Provider or transport failure
    async fn generate(&self, prompt: &str, settings: &GenerationSettings) -> Result<String>;
}
