//! Error types for the Gemini API client.

use thiserror::Error;

/// Errors that can occur when calling the generative model.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini API returned an error status.
    #[error("API error ({status}): {message}")]
    Api {
        /// Status string from the API (`INVALID_ARGUMENT`, `PERMISSION_DENIED`).
        status: String,
        /// Error message.
        message: String,
    },

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// No API key was configured.
    #[error("generative model is not configured")]
    NotConfigured,

    /// The model returned no text (blocked prompt or empty candidate list).
    #[error("model returned no text{}", .0.as_deref().map(|r| format!(" ({r})")).unwrap_or_default())]
    EmptyResponse(Option<String>),
}

/// Error envelope returned by Google APIs.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Numeric HTTP code.
    #[serde(default)]
    pub code: u16,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Canonical status name.
    #[serde(default)]
    pub status: String,
}
