//! Firestore REST writer for the content audit trail.
//!
//! Documents are created with an auto-generated ID under
//! `projects/{project}/databases/(default)/documents/{collection}`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::instrument;

use crate::audit::{AUDIT_COLLECTION, AuditError, AuditLog, AuditRecord};
use crate::config::GoogleConfig;

const FIRESTORE_API_BASE: &str = "https://firestore.googleapis.com/v1";

/// Audit log backed by a Firestore collection.
#[derive(Clone)]
pub struct FirestoreAuditLog {
    inner: Arc<FirestoreInner>,
}

struct FirestoreInner {
    client: reqwest::Client,
    access_token: SecretString,
    collection_url: String,
}

impl FirestoreAuditLog {
    /// Build a writer if both project and token are configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(
        config: &GoogleConfig,
        timeout: Duration,
    ) -> Result<Option<Self>, reqwest::Error> {
        let (Some(project_id), Some(token)) = (&config.project_id, &config.access_token) else {
            return Ok(None);
        };

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Some(Self {
            inner: Arc::new(FirestoreInner {
                client,
                access_token: token.clone(),
                collection_url: collection_url(project_id, AUDIT_COLLECTION),
            }),
        }))
    }
}

fn collection_url(project_id: &str, collection: &str) -> String {
    format!("{FIRESTORE_API_BASE}/projects/{project_id}/databases/(default)/documents/{collection}")
}

/// Encode a record as a Firestore document body.
fn document(record: &AuditRecord) -> Value {
    json!({
        "fields": {
            "contentType": { "stringValue": record.content_type },
            "originalPrompt": { "stringValue": record.prompt },
            "generatedContent": { "stringValue": record.output },
            "usedFallback": { "booleanValue": record.used_fallback },
            "language": { "stringValue": record.language },
            "model": { "stringValue": record.model },
            "createdAt": { "timestampValue": record.created_at.to_rfc3339() },
        }
    })
}

#[async_trait]
impl AuditLog for FirestoreAuditLog {
    #[instrument(skip(self, record), fields(content_type = %record.content_type))]
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let response = self
            .inner
            .client
            .post(&self.inner.collection_url)
            .bearer_auth(self.inner.access_token.expose_secret())
            .json(&document(record))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(AuditError::Rejected {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        })
    }
}
