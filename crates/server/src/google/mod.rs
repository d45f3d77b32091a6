//! Google Cloud REST integrations.
//!
//! # Services
//!
//! | Trait                | API                    | Auth              |
//! |----------------------|------------------------|-------------------|
//! | [`Translator`]       | Cloud Translation v2   | API key (`?key=`) |
//! | [`SpeechRecognizer`] | Cloud Speech-to-Text v1| API key (`?key=`) |
//! | [`ImageAnnotator`]   | Cloud Vision v1        | API key (`?key=`) |
//! | [`crate::audit::AuditLog`] | Firestore v1     | OAuth bearer      |
//!
//! [`GoogleCloudClient`] implements the three key-authenticated traits over
//! one shared `reqwest` client. Firestore lives in [`firestore`] because it
//! authenticates differently.

pub mod firestore;
mod speech;
mod translate;
mod vision;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::GoogleConfig;
use crate::genai::ApiErrorResponse;

pub use firestore::FirestoreAuditLog;
pub use speech::SPEECH_SAMPLE_RATE_HERTZ;
pub use translate::{CachingTranslator, Translation};
pub use vision::{DetectedObject, ImageAnalysis, Label};

/// Errors from Google Cloud REST calls.
#[derive(Debug, Error)]
pub enum GoogleError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status.
    #[error("API error ({status}): {message}")]
    Api {
        /// Status string from the API.
        status: String,
        /// Error message.
        message: String,
    },

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// No credentials were configured for this service.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

// =============================================================================
// Service traits
// =============================================================================

/// Machine translation.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`. `source` of `None` asks the service
    /// to detect the language.
    async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<Translation, GoogleError>;
}

/// Speech-to-text for short recordings.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe base64 WEBM/Opus audio. Transcripts of consecutive
    /// results are joined with newlines.
    async fn transcribe(&self, audio_base64: &str, language_code: &str)
    -> Result<String, GoogleError>;
}

/// Image labelling and safety annotation.
#[async_trait]
pub trait ImageAnnotator: Send + Sync {
    /// Annotate the image at a public URL.
    async fn annotate(&self, image_url: &str) -> Result<ImageAnalysis, GoogleError>;
}

// =============================================================================
// GoogleCloudClient
// =============================================================================

/// API-key client for Translation, Speech-to-Text and Vision.
#[derive(Clone)]
pub struct GoogleCloudClient {
    inner: Arc<GoogleCloudClientInner>,
}

struct GoogleCloudClientInner {
    client: reqwest::Client,
    api_key: Option<SecretString>,
}

impl GoogleCloudClient {
    /// Create a new client. A missing key surfaces per call as
    /// [`GoogleError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &GoogleConfig, timeout: Duration) -> Result<Self, GoogleError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(GoogleCloudClientInner {
                client,
                api_key: config.api_key.clone(),
            }),
        })
    }

    /// POST `body` to `url` with the API key and decode the JSON reply.
    async fn post_json<B, R>(
        &self,
        service: &'static str,
        url: &str,
        body: &B,
    ) -> Result<R, GoogleError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self.keyed_post(service, url)?.json(body).send().await?;

        decode_response(response).await
    }

    /// POST builder for `url` carrying the API key as `?key=`.
    fn keyed_post(
        &self,
        service: &'static str,
        url: &str,
    ) -> Result<reqwest::RequestBuilder, GoogleError> {
        let api_key = self
            .inner
            .api_key
            .as_ref()
            .ok_or(GoogleError::NotConfigured(service))?;

        Ok(self
            .inner
            .client
            .post(url)
            .query(&[("key", api_key.expose_secret())]))
    }
}

/// Decode a JSON response, mapping error statuses to `GoogleError::Api`.
pub(crate) async fn decode_response<R: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<R, GoogleError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_error) => GoogleError::Api {
                status: api_error.error.status,
                message: api_error.error.message,
            },
            Err(_) => GoogleError::Api {
                status: status.to_string(),
                message: body,
            },
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| GoogleError::Parse(format!("Failed to parse response: {e}")))
}
