//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Every error renders as JSON:
//!
//! ```text
//! 4xx  { "success": false, "error": "<what was wrong>" }
//! 5xx  { "success": false, "error": "<generic>", "message": "Something went wrong!" }
//! ```
//!
//! For 5xx responses the raw error text is attached as an [`ErrorDetail`]
//! response extension; [`crate::middleware::error_detail_middleware`] swaps
//! it into `message` when running in development.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::genai::GenAiError;
use crate::google::GoogleError;
use crate::services::images::ImageError;

/// Message shown in place of internal error text outside development.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong!";

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A platform name outside the supported set.
    #[error("{message}")]
    UnsupportedPlatform {
        /// Client-facing message.
        message: String,
        /// Names the caller may use instead.
        supported: Vec<&'static str>,
    },

    /// Resource not found. Carries the entity name (`Product`, `Order`).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Generative model call failed.
    #[error("Generative AI error: {0}")]
    GenAi(#[from] GenAiError),

    /// Google Cloud API call failed.
    #[error("Google Cloud error: {0}")]
    Google(#[from] GoogleError),

    /// Image upload or processing failed.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Raw error text of a 5xx response, kept out of the body by default.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::UnsupportedPlatform { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::GenAi(_) | Self::Google(_) => StatusCode::BAD_GATEWAY,
            Self::Image(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            Self::Image(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to any client.
    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::UnsupportedPlatform { message, .. } => message.clone(),
            Self::NotFound(_) => self.to_string(),
            Self::GenAi(_) | Self::Google(_) => "External service error".to_string(),
            Self::Image(err) if err.is_validation() => err.to_string(),
            Self::Image(_) => "Failed to process images".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            // Capture server errors to Sentry
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );

            let body = json!({
                "success": false,
                "error": self.public_message(),
                "message": GENERIC_ERROR_MESSAGE,
            });
            let mut response = (status, Json(body)).into_response();
            response
                .extensions_mut()
                .insert(ErrorDetail(self.to_string()));
            return response;
        }

        let mut body = json!({
            "success": false,
            "error": self.public_message(),
        });
        if let Self::UnsupportedPlatform { supported, .. } = &self {
            body["supportedPlatforms"] = json!(supported);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
