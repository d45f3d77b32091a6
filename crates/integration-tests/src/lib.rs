//! Router-level integration tests for Artisan Hub.
//!
//! Every test drives the real router in-process with
//! `tower::ServiceExt::oneshot`. Catalog data comes from the server's
//! fixtures; outbound services are replaced by the doubles in
//! `artisan_hub_server::testing`; uploads land in a temporary directory.
//!
//! ```bash
//! cargo test -p artisan-hub-integration-tests
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use artisan_hub_server::audit::{AuditLog, AuditRecord};
use artisan_hub_server::catalog::Catalog;
use artisan_hub_server::config::{Environment, ServerConfig};
use artisan_hub_server::genai::TextGenerator;
use artisan_hub_server::state::{AppState, Services};
use artisan_hub_server::testing::{FixedGenerator, RecordingAuditLog, StubCloud};
use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const MULTIPART_BOUNDARY: &str = "artisan-hub-test-boundary";

/// Directory of the server's JSON fixtures.
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../server/data")
}

/// A router wired to test doubles, with its own uploads directory.
pub struct TestApp {
    router: Router,
    uploads: TempDir,
    audit: Arc<RecordingAuditLog>,
}

impl TestApp {
    /// App whose model replies with an empty string.
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(Arc::new(FixedGenerator::new("")))
    }

    /// App whose model replies with `reply`.
    #[must_use]
    pub fn replying(reply: &str) -> Self {
        Self::with_generator(Arc::new(FixedGenerator::new(reply)))
    }

    /// App using `generator` in development mode.
    #[must_use]
    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self::build(generator, Environment::Development)
    }

    /// App using `generator` in the given environment.
    ///
    /// # Panics
    ///
    /// Panics if the temp directory or the fixtures cannot be loaded.
    #[must_use]
    pub fn build(generator: Arc<dyn TextGenerator>, environment: Environment) -> Self {
        let uploads = tempfile::tempdir().expect("create uploads dir");
        let mut config = ServerConfig::development(fixtures_dir(), uploads.path());
        config.environment = environment;

        let catalog = Catalog::load(&config.fixtures_dir).expect("load fixtures");
        let audit = Arc::new(RecordingAuditLog::default());
        let cloud = Arc::new(StubCloud);

        let state = AppState::from_parts(
            config,
            catalog,
            Services {
                generator,
                audit: Arc::clone(&audit) as Arc<dyn AuditLog>,
                translator: cloud.clone(),
                speech: cloud.clone(),
                vision: cloud,
            },
        );

        Self {
            router: artisan_hub_server::app(state),
            uploads,
            audit,
        }
    }

    /// Directory uploads are written to.
    #[must_use]
    pub fn uploads_dir(&self) -> &Path {
        self.uploads.path()
    }

    /// Number of entries in the uploads directory.
    #[must_use]
    pub fn upload_count(&self) -> usize {
        std::fs::read_dir(self.uploads_dir()).map_or(0, Iterator::count)
    }

    /// Wait for at least `n` audit records from detached tasks.
    pub async fn audit_records(&self, n: usize) -> Vec<AuditRecord> {
        for _ in 0..100 {
            let records = self.audit.records();
            if records.len() >= n {
                return records;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.audit.records()
    }

    /// Send a request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request(Method::GET, uri, None, Body::empty()))
            .await
    }

    /// `POST uri` with a JSON body.
    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(request(
            Method::POST,
            uri,
            Some("application/json".to_string()),
            Body::from(body.to_string()),
        ))
        .await
    }

    /// `POST uri` with a multipart body of `(field, filename, mime, bytes)`.
    pub async fn post_multipart(&self, uri: &str, parts: &[FilePart<'_>]) -> TestResponse {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    part.field, part.filename, part.mime
                )
                .as_bytes(),
            );
            body.extend_from_slice(part.bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        self.send(request(
            Method::POST,
            uri,
            Some(format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")),
            Body::from(body),
        ))
        .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// One file in a multipart upload.
#[derive(Debug, Clone, Copy)]
pub struct FilePart<'a> {
    pub field: &'a str,
    pub filename: &'a str,
    pub mime: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> FilePart<'a> {
    /// A file in the `images` field.
    #[must_use]
    pub const fn image(filename: &'a str, mime: &'a str, bytes: &'a [u8]) -> Self {
        Self {
            field: "images",
            filename,
            mime,
            bytes,
        }
    }
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "body is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }
}

fn request(method: Method, uri: &str, content_type: Option<String>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(body).expect("valid request")
}
