//! Gemini API client for one-shot text generation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::config::GoogleConfig;

use super::TextGenerator;
use super::error::{ApiErrorResponse, GenAiError};
use super::types::{GenerateRequest, GenerateResponse};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// A missing API key is not an error here; [`TextGenerator::generate`]
    /// reports [`GenAiError::NotConfigured`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &GoogleConfig, timeout: Duration) -> Result<Self, GenAiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                api_key: config.api_key.clone(),
                model: config.gemini_model.clone(),
                base_url: GEMINI_API_BASE.to_string(),
            }),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.inner.base_url, self.inner.model
        )
    }

    /// Handle a successful or failed response.
    async fn handle_response(response: reqwest::Response) -> Result<String, GenAiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| GenAiError::Parse(format!("Failed to parse response: {e}")))?;

        parsed
            .text()
            .ok_or_else(|| GenAiError::EmptyResponse(parsed.empty_reason()))
    }

    /// Turn an error status into a `GenAiError`.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GenAiError {
        match response.text().await {
            Ok(body) => match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => GenAiError::Api {
                    status: api_error.error.status,
                    message: api_error.error.message,
                },
                Err(_) => GenAiError::Api {
                    status: status.to_string(),
                    message: body,
                },
            },
            Err(e) => GenAiError::Http(e),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.inner.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        let api_key = self
            .inner
            .api_key
            .as_ref()
            .ok_or(GenAiError::NotConfigured)?;

        let response = self
            .inner
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await?;

        let text = Self::handle_response(response).await?;
        tracing::debug!(chars = text.len(), "Model reply received");
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.inner.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>) -> GoogleConfig {
        GoogleConfig {
            api_key: key.map(|k| SecretString::from(k.to_string())),
            gemini_model: "gemini-2.5-flash".to_string(),
            ..GoogleConfig::default()
        }
    }

    #[test]
    fn test_endpoint_embeds_model() {
        let client = GeminiClient::new(&config(None), Duration::from_secs(5)).expect("client");
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_generate_without_key_is_not_configured() {
        let client = GeminiClient::new(&config(None), Duration::from_secs(5)).expect("client");
        let err = client.generate("hello").await.expect_err("no key");
        assert!(matches!(err, GenAiError::NotConfigured));
    }
}
