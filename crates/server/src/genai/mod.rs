//! Generative text model integration.
//!
//! # Overview
//!
//! Handlers depend on the [`TextGenerator`] trait rather than a concrete
//! client, so tests can swap in canned replies. The production
//! implementation is [`GeminiClient`], which calls the Gemini
//! `generateContent` REST endpoint with an API key.
//!
//! Structured output is not requested from the model; callers extract and
//! validate JSON themselves (see [`crate::services::content`]).

mod client;
mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::{ApiError, ApiErrorResponse, GenAiError};

use async_trait::async_trait;

/// A one-shot prompt to text completion service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the model's raw text reply.
    ///
    /// # Errors
    ///
    /// Returns `GenAiError` if the model is not configured, the request
    /// fails, or the reply carries no text.
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError>;

    /// Model name, recorded alongside generated content.
    fn model(&self) -> &str;
}
