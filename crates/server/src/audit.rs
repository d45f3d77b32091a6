//! Audit trail for generated content.
//!
//! Every successful model call produces an [`AuditRecord`] that is handed
//! to an [`AuditLog`] on a detached task. Records are write-only; nothing
//! in the service reads them back.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Collection the records are written to.
pub const AUDIT_COLLECTION: &str = "ai_generated_content";

/// Errors from writing an audit record.
#[derive(Debug, Error)]
pub enum AuditError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store rejected the write.
    #[error("write rejected ({status}): {message}")]
    Rejected {
        /// HTTP status of the response.
        status: u16,
        /// Response body.
        message: String,
    },
}

/// What was asked of the model and what came back.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    /// Content kind, or a free-form label for non-kind prompts.
    pub content_type: String,
    pub prompt: String,
    /// Raw model reply before extraction.
    pub output: String,
    /// Whether the reply failed validation and the fallback was served.
    pub used_fallback: bool,
    pub language: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Record stamped with the current time.
    #[must_use]
    pub fn new(
        content_type: &str,
        prompt: &str,
        output: &str,
        used_fallback: bool,
        language: &str,
        model: &str,
    ) -> Self {
        Self {
            content_type: content_type.to_string(),
            prompt: prompt.to_string(),
            output: output.to_string(),
            used_fallback,
            language: language.to_string(),
            model: model.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Append-only store for audit records.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Persist one record.
    ///
    /// # Errors
    ///
    /// Returns `AuditError` if the write fails.
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError>;
}

/// Audit log that drops every record. Used when no store is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditLog;

#[async_trait]
impl AuditLog for NoopAuditLog {
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        tracing::trace!(content_type = %record.content_type, "Audit log disabled, record dropped");
        Ok(())
    }
}

/// Write `record` on a detached task. Failures are logged and dropped.
pub fn spawn_record(log: Arc<dyn AuditLog>, record: AuditRecord) {
    tokio::spawn(async move {
        if let Err(e) = log.record(&record).await {
            tracing::warn!(
                error = %e,
                content_type = %record.content_type,
                "Failed to write audit record"
            );
        }
    });
}
