//! Cloud Translation v2 and an in-memory translation cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{GoogleCloudClient, GoogleError, Translator};

const TRANSLATE_URL: &str = "https://translation.googleapis.com/language/translate/v2";
const CACHE_TTL: Duration = Duration::from_secs(60 * 60);
const CACHE_CAPACITY: u64 = 10_000;

/// A translated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
    /// Language the service detected, or the requested source.
    pub detected_language: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    format: &'static str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<TranslatedItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedItem {
    #[serde(default)]
    translated_text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

#[async_trait]
impl Translator for GoogleCloudClient {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<Translation, GoogleError> {
        let request = TranslateRequest {
            q: text,
            target,
            source,
            format: "text",
        };
        let response: TranslateResponse = self
            .post_json("Cloud Translation", TRANSLATE_URL, &request)
            .await?;

        let first = response.data.translations.into_iter().next();
        let (translated_text, detected) = first
            .map(|t| (t.translated_text, t.detected_source_language))
            .unwrap_or_default();

        Ok(Translation {
            translated_text,
            detected_language: detected
                .or_else(|| source.map(str::to_string))
                .unwrap_or_else(|| "auto".to_string()),
        })
    }
}

// =============================================================================
// CachingTranslator
// =============================================================================

/// Wraps a [`Translator`] with a one-hour in-memory cache keyed by
/// source, target and text.
#[derive(Clone)]
pub struct CachingTranslator {
    inner: Arc<dyn Translator>,
    cache: Cache<String, Translation>,
}

impl CachingTranslator {
    /// Wrap `inner` with a fresh cache.
    #[must_use]
    pub fn new(inner: Arc<dyn Translator>) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();
        Self { inner, cache }
    }
}

#[async_trait]
impl Translator for CachingTranslator {
    async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<Translation, GoogleError> {
        let cache_key = format!("{}:{target}:{text}", source.unwrap_or("auto"));

        if let Some(hit) = self.cache.get(&cache_key).await {
            debug!(target_language = target, "Translation cache hit");
            return Ok(hit);
        }

        let translation = self.inner.translate(text, source, target).await?;
        self.cache.insert(cache_key, translation.clone()).await;
        Ok(translation)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct CountingTranslator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Translator for CountingTranslator {
        async fn translate(
            &self,
            text: &str,
            source: Option<&str>,
            target: &str,
        ) -> Result<Translation, GoogleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Translation {
                translated_text: format!("{text}->{target}"),
                detected_language: source.unwrap_or("hi").to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_cache_serves_repeated_requests() {
        let counting = Arc::new(CountingTranslator::default());
        let translator = CachingTranslator::new(counting.clone());

        let first = translator.translate("namaste", None, "en").await.expect("ok");
        let second = translator.translate("namaste", None, "en").await.expect("ok");

        assert_eq!(first, second);
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_key_includes_languages() {
        let counting = Arc::new(CountingTranslator::default());
        let translator = CachingTranslator::new(counting.clone());

        translator.translate("namaste", None, "en").await.expect("ok");
        translator.translate("namaste", None, "fr").await.expect("ok");
        translator.translate("namaste", Some("hi"), "en").await.expect("ok");

        assert_eq!(counting.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_request_omits_auto_source() {
        let request = TranslateRequest {
            q: "hello",
            target: "hi",
            source: None,
            format: "text",
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("source").is_none());
        assert_eq!(json["target"], "hi");
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"data":{"translations":[{"translatedText":"Hello","detectedSourceLanguage":"hi"}]}}"#;
        let response: TranslateResponse = serde_json::from_str(json).expect("deserialize");
        let item = &response.data.translations[0];
        assert_eq!(item.translated_text, "Hello");
        assert_eq!(item.detected_source_language.as_deref(), Some("hi"));
    }
}
