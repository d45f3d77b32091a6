//! Social post and share handlers.

use std::collections::BTreeMap;

use artisan_hub_core::{PostPlatform, ShareInstructions, ShareLink, SharePlatform};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::services::social::{PostBatch, ShareAnalytics, SocialPost};
use crate::state::AppState;

use super::blank_as_none;

/// Build the social router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/social/generate", post(generate))
        .route("/api/social/share", post(share))
        .route("/api/social/analytics/{product_id}", get(analytics))
}

// =============================================================================
// Post generation
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub product_id: Option<String>,
    pub platforms: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub product_id: String,
    pub posts: BTreeMap<PostPlatform, SocialPost>,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Template posts for the requested platforms. Unknown platform names are
/// dropped.
///
/// # Errors
///
/// Returns 400 when `productId` or `platforms` is missing, or when no
/// requested platform is supported.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    let (Some(product_id), Some(requested)) = (body.product_id, body.platforms) else {
        return Err(AppError::BadRequest(
            "Product ID and platforms array are required".to_string(),
        ));
    };

    let platforms: Vec<PostPlatform> = requested.iter().filter_map(|p| p.parse().ok()).collect();
    if platforms.is_empty() {
        return Err(AppError::UnsupportedPlatform {
            message: "No valid platforms specified".to_string(),
            supported: PostPlatform::supported_names(),
        });
    }

    let product = state.catalog().product(&product_id);
    let handle = product.map_or(product_id.as_str(), |p| p.slug.as_str());
    let product_url = state.config().product_url(handle);

    let batch = PostBatch::build(&platforms, product.map(|p| p.title.as_str()), &product_url);
    tracing::debug!(%product_id, posts = batch.posts.len(), "Social posts generated");

    Ok(Json(GenerateResponse {
        success: true,
        product_id,
        posts: batch.posts,
        generated_at: batch.generated_at,
        expires_at: batch.expires_at,
    }))
}

// =============================================================================
// Share links
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub post_id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub platform: Option<String>,
    pub product_url: Option<String>,
    pub custom_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub success: bool,
    pub post_id: String,
    pub platform: SharePlatform,
    pub share_url: Option<String>,
    pub shared_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<ShareInstructions>,
}

/// Build a share deep link, or manual instructions for Instagram.
///
/// # Errors
///
/// Returns 400 when `postId` or `platform` is missing or the platform is
/// not supported.
pub async fn share(
    State(state): State<AppState>,
    Json(body): Json<ShareRequest>,
) -> Result<Json<ShareResponse>> {
    let (Some(post_id), Some(platform)) = (body.post_id, body.platform) else {
        return Err(AppError::BadRequest(
            "Post ID and platform are required".to_string(),
        ));
    };

    let platform: SharePlatform = platform
        .parse()
        .map_err(|_| AppError::UnsupportedPlatform {
            message: "Unsupported platform".to_string(),
            supported: SharePlatform::supported_names(),
        })?;

    let product_url = body
        .product_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| state.config().product_url(&post_id));

    let (share_url, instructions) =
        match platform.share_link(&product_url, body.custom_message.as_deref()) {
            ShareLink::Url(url) => (Some(url), None),
            ShareLink::Manual(instructions) => (None, Some(instructions)),
        };

    Ok(Json(ShareResponse {
        success: true,
        post_id,
        platform,
        share_url,
        shared_at: Utc::now(),
        instructions,
    }))
}

// =============================================================================
// Analytics
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub product_id: String,
    pub analytics: ShareAnalytics,
    pub last_updated: DateTime<Utc>,
}

/// Placeholder share analytics for a product.
pub async fn analytics(Path(product_id): Path<String>) -> Json<AnalyticsResponse> {
    Json(AnalyticsResponse {
        product_id,
        analytics: ShareAnalytics::placeholder(),
        last_updated: Utc::now(),
    })
}
