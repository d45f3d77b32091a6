//! HTTP routes.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                   - Service banner
//! GET  /health, /api/health                - Liveness
//!
//! # Catalog
//! GET  /api/products[?category&artisanId&limit]
//! GET  /api/products/:idOrSlug
//! GET  /api/artisans
//! GET  /api/artisans/:id
//! GET  /api/artisans/:id/products
//! GET  /api/orders[?status&productId&limit]
//! GET  /api/orders/:id
//! GET  /api/dashboard
//!
//! # Images
//! POST /api/images/upload                  - multipart field `images`
//! POST /api/images/generate
//! GET  /uploads/*                          - stored files
//!
//! # Marketing and social
//! POST /api/marketing/description
//! POST /api/marketing/package/:productId
//! POST /api/social/generate
//! POST /api/social/share
//! GET  /api/social/analytics/:productId
//!
//! # AI
//! POST /api/ai/generate
//! POST /api/ai/translate
//! POST /api/ai/speech
//! POST /api/ai/analyze-image
//! POST /api/ai/insights
//! ```

pub mod ai;
pub mod artisans;
pub mod dashboard;
pub mod images;
pub mod marketing;
pub mod orders;
pub mod products;
pub mod social;

use axum::{
    Json, Router,
    extract::Request,
    http::{HeaderName, HeaderValue, Method, StatusCode, Uri, header::CONTENT_TYPE},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::middleware::{
    REQUEST_ID_HEADER, error_detail_middleware, request_id_middleware,
    security_headers_middleware,
};
use crate::state::AppState;

/// Version reported by the banner and health check.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Top-level endpoints advertised by `/` and the 404 fallback.
pub const AVAILABLE_ENDPOINTS: [&str; 9] = [
    "/health",
    "/api/products",
    "/api/artisans",
    "/api/orders",
    "/api/dashboard",
    "/api/images",
    "/api/marketing",
    "/api/social",
    "/api/ai",
];

// =============================================================================
// Request helpers
// =============================================================================

/// Deserialize an optional string, treating empty or whitespace-only
/// values as absent. Use with `#[serde(default, deserialize_with = ...)]`.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// =============================================================================
// Response envelopes
// =============================================================================

/// `{ success, data, count, filters? }` list envelope.
#[derive(Debug, Serialize)]
pub struct ListResponse<T, F = ()> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
    /// Echo of the query; absent values serialize as `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<F>,
}

impl<T, F> ListResponse<T, F> {
    /// A filtered listing that echoes its query.
    #[must_use]
    pub fn new(data: Vec<T>, filters: F) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
            filters: Some(filters),
        }
    }
}

impl<T> ListResponse<T> {
    /// A listing without filters.
    #[must_use]
    pub fn unfiltered(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
            filters: None,
        }
    }
}

/// `{ success, data }` lookup envelope.
#[derive(Debug, Serialize)]
pub struct ItemResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ItemResponse<T> {
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// Build the complete application router, middleware included.
pub fn app(state: AppState) -> Router {
    let config = state.config();
    let uploads = ServeDir::new(&config.uploads_dir);
    let cors = cors_layer(config);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/health", get(health))
        .merge(products::router())
        .merge(artisans::router())
        .merge(orders::router())
        .merge(dashboard::router())
        .merge(images::router())
        .merge(marketing::router())
        .merge(social::router())
        .merge(ai::router())
        .nest_service("/uploads", uploads)
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), error_detail_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, request_id.clone()])
        .expose_headers([request_id]);

    match HeaderValue::from_str(&config.allowed_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(err) => {
            tracing::warn!(
                origin = %config.allowed_origin,
                error = %err,
                "Invalid ALLOWED_ORIGIN, cross-origin requests will be refused"
            );
            layer
        }
    }
}

// =============================================================================
// Service endpoints
// =============================================================================

/// Service banner listing the endpoint groups.
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Artisan Hub API",
        "version": VERSION,
        "endpoints": AVAILABLE_ENDPOINTS,
    }))
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    message: &'static str,
    timestamp: DateTime<Utc>,
    version: &'static str,
}

/// Liveness check. Does not touch upstream services.
async fn health() -> Json<Health> {
    Json(Health {
        status: "OK",
        message: "Artisan Hub API is running",
        timestamp: Utc::now(),
        version: VERSION,
    })
}

/// JSON 404 for unknown routes.
async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": format!("Route {} not found", uri.path()),
            "availableEndpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}
