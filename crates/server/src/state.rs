//! Application state shared across handlers.

use std::sync::Arc;

use crate::audit::{AuditLog, NoopAuditLog};
use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::genai::{GeminiClient, GenAiError, TextGenerator};
use crate::google::{
    CachingTranslator, FirestoreAuditLog, GoogleCloudClient, GoogleError, ImageAnnotator,
    SpeechRecognizer, Translator,
};

/// Error building the outbound clients.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("generative model client: {0}")]
    GenAi(#[from] GenAiError),
    #[error("Google Cloud client: {0}")]
    Google(#[from] GoogleError),
    #[error("audit log client: {0}")]
    Audit(#[from] reqwest::Error),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The catalog is an immutable snapshot; the
/// clients sit behind traits so tests can swap in mocks.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    catalog: Catalog,
    generator: Arc<dyn TextGenerator>,
    audit: Arc<dyn AuditLog>,
    translator: Arc<dyn Translator>,
    speech: Arc<dyn SpeechRecognizer>,
    vision: Arc<dyn ImageAnnotator>,
}

/// Outbound collaborators of the server.
pub struct Services {
    pub generator: Arc<dyn TextGenerator>,
    pub audit: Arc<dyn AuditLog>,
    pub translator: Arc<dyn Translator>,
    pub speech: Arc<dyn SpeechRecognizer>,
    pub vision: Arc<dyn ImageAnnotator>,
}

impl AppState {
    /// Create state backed by the real Google clients.
    ///
    /// The audit log is written to Firestore when a project and access token
    /// are configured, and discarded otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn new(config: ServerConfig, catalog: Catalog) -> Result<Self, StateError> {
        let timeout = config.upstream_timeout;
        let generator = GeminiClient::new(&config.google, timeout)?;
        let cloud = GoogleCloudClient::new(&config.google, timeout)?;

        let audit: Arc<dyn AuditLog> =
            match FirestoreAuditLog::from_config(&config.google, timeout)? {
                Some(firestore) => {
                    tracing::info!("AI audit log writes to Firestore");
                    Arc::new(firestore)
                }
                None => {
                    tracing::info!("Firestore not configured, AI audit log disabled");
                    Arc::new(NoopAuditLog)
                }
            };

        let services = Services {
            generator: Arc::new(generator),
            audit,
            translator: Arc::new(CachingTranslator::new(Arc::new(cloud.clone()))),
            speech: Arc::new(cloud.clone()),
            vision: Arc::new(cloud),
        };

        Ok(Self::from_parts(config, catalog, services))
    }

    /// Create state from explicit collaborators.
    #[must_use]
    pub fn from_parts(config: ServerConfig, catalog: Catalog, services: Services) -> Self {
        let Services {
            generator,
            audit,
            translator,
            speech,
            vision,
        } = services;

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                generator,
                audit,
                translator,
                speech,
                vision,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog snapshot.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the generative text model.
    #[must_use]
    pub fn generator(&self) -> &dyn TextGenerator {
        self.inner.generator.as_ref()
    }

    /// Get the AI audit log.
    #[must_use]
    pub fn audit(&self) -> &Arc<dyn AuditLog> {
        &self.inner.audit
    }

    /// Get the translation client.
    #[must_use]
    pub fn translator(&self) -> &dyn Translator {
        self.inner.translator.as_ref()
    }

    /// Get the speech recognition client.
    #[must_use]
    pub fn speech(&self) -> &dyn SpeechRecognizer {
        self.inner.speech.as_ref()
    }

    /// Get the image annotation client.
    #[must_use]
    pub fn vision(&self) -> &dyn ImageAnnotator {
        self.inner.vision.as_ref()
    }
}
