//! In-memory stand-ins for the outbound services.
//!
//! Compiled for unit tests and behind the `test-support` feature so the
//! integration-tests crate can drive the router without network access.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::audit::{AuditError, AuditLog, AuditRecord};
use crate::genai::{GenAiError, TextGenerator};
use crate::google::{
    GoogleError, ImageAnalysis, ImageAnnotator, Label, SpeechRecognizer, Translation, Translator,
};

/// Model name reported by the test generators.
pub const TEST_MODEL: &str = "test-model";

/// Generator that answers every prompt with the same reply.
#[derive(Debug, Default)]
pub struct FixedGenerator {
    reply: String,
    calls: AtomicUsize,
}

impl FixedGenerator {
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of prompts received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenAiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }

    fn model(&self) -> &str {
        TEST_MODEL
    }
}

/// Generator whose upstream is always down.
#[derive(Debug, Default)]
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenAiError> {
        Err(GenAiError::Api {
            status: "UNAVAILABLE".to_string(),
            message: "model overloaded".to_string(),
        })
    }

    fn model(&self) -> &str {
        TEST_MODEL
    }
}

/// Audit log that keeps records in memory.
#[derive(Debug, Default)]
pub struct RecordingAuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl RecordingAuditLog {
    /// Records written so far.
    #[must_use]
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditLog for RecordingAuditLog {
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
        Ok(())
    }
}

/// Cloud services that answer deterministically.
///
/// Translation prefixes the text with the target language, speech returns a
/// fixed transcript and vision reports a single label.
#[derive(Debug, Default)]
pub struct StubCloud;

/// Transcript returned by [`StubCloud`].
pub const STUB_TRANSCRIPT: &str = "namaste\nwelcome to the workshop";

#[async_trait]
impl Translator for StubCloud {
    async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<Translation, GoogleError> {
        Ok(Translation {
            translated_text: format!("[{target}] {text}"),
            detected_language: source.unwrap_or("en").to_string(),
        })
    }
}

#[async_trait]
impl SpeechRecognizer for StubCloud {
    async fn transcribe(
        &self,
        _audio_base64: &str,
        _language_code: &str,
    ) -> Result<String, GoogleError> {
        Ok(STUB_TRANSCRIPT.to_string())
    }
}

#[async_trait]
impl ImageAnnotator for StubCloud {
    async fn annotate(&self, _image_url: &str) -> Result<ImageAnalysis, GoogleError> {
        Ok(ImageAnalysis {
            labels: vec![Label {
                description: "Pottery".to_string(),
                score: 0.97,
            }],
            objects: Vec::new(),
            safe_search: None,
            image_properties: None,
        })
    }
}

/// Cloud services without credentials.
#[derive(Debug, Default)]
pub struct UnavailableCloud;

#[async_trait]
impl Translator for UnavailableCloud {
    async fn translate(
        &self,
        _text: &str,
        _source: Option<&str>,
        _target: &str,
    ) -> Result<Translation, GoogleError> {
        Err(GoogleError::NotConfigured("Cloud Translation"))
    }
}

#[async_trait]
impl SpeechRecognizer for UnavailableCloud {
    async fn transcribe(
        &self,
        _audio_base64: &str,
        _language_code: &str,
    ) -> Result<String, GoogleError> {
        Err(GoogleError::NotConfigured("Speech-to-Text"))
    }
}

#[async_trait]
impl ImageAnnotator for UnavailableCloud {
    async fn annotate(&self, _image_url: &str) -> Result<ImageAnalysis, GoogleError> {
        Err(GoogleError::NotConfigured("Cloud Vision"))
    }
}
