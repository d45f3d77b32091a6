//! Marketing copy handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::services::content::{DescriptionContent, GenerationContext, MarketingPackage};
use crate::services::prompts::{self, BasicInfo, PackageSubject};
use crate::state::AppState;

/// Language recorded for marketing copy.
const MARKETING_LANGUAGE: &str = "en";

const UNKNOWN_PRODUCT: &str = "Handcrafted Item";
const UNKNOWN_ARTISAN: &str = "Traditional Artisan";
const UNKNOWN_LOCATION: &str = "India";

/// Build the marketing router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/marketing/description", post(description))
        .route("/api/marketing/package/{product_id}", post(package))
}

/// Description request: uploaded photos plus optional seller hints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionRequest {
    #[serde(default)]
    pub images: Vec<Value>,
    #[serde(default)]
    pub basic_info: BasicInfoBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoBody {
    pub category: Option<String>,
    pub location: Option<String>,
    pub price_range: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    pub success: bool,
    pub generated: DescriptionContent,
    pub source: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Write a product description from photos and hints.
///
/// # Errors
///
/// Returns 400 without images and 502 when the model call fails.
pub async fn description(
    State(state): State<AppState>,
    Json(body): Json<DescriptionRequest>,
) -> Result<Json<DescriptionResponse>> {
    if body.images.is_empty() {
        return Err(AppError::BadRequest(
            "At least one image is required".to_string(),
        ));
    }

    let info = BasicInfo {
        category: body.basic_info.category.as_deref(),
        location: body.basic_info.location.as_deref(),
        price_range: body.basic_info.price_range.as_deref(),
    };
    let prompt = prompts::description_prompt(&info, body.images.len());

    let generation = context(&state)
        .generate::<DescriptionContent>("description", &prompt)
        .await?;

    Ok(Json(DescriptionResponse {
        success: true,
        source: generation.source(),
        generated: generation.into_inner(),
        timestamp: Utc::now(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResponse {
    pub success: bool,
    pub product_id: String,
    pub marketing_package: MarketingPackage,
    pub source: &'static str,
    pub generated_at: DateTime<Utc>,
}

/// Write a complete marketing package for a product.
///
/// Unknown products still get a package written from generic facts.
///
/// # Errors
///
/// Returns 502 when the model call fails.
pub async fn package(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<PackageResponse>> {
    let catalog = state.catalog();
    let product = catalog.product(&product_id);
    let artisan = product.and_then(|p| catalog.artisan(p.artisan_id.as_str()));

    let subject = PackageSubject {
        product_id: &product_id,
        title: product.map_or(UNKNOWN_PRODUCT, |p| p.title.as_str()),
        category: product.map_or(UNKNOWN_PRODUCT, |p| p.category.as_str()),
        artisan: artisan.map_or(UNKNOWN_ARTISAN, |a| a.name.as_str()),
        location: artisan.map_or(UNKNOWN_LOCATION, |a| a.location.as_str()),
    };
    let prompt = prompts::package_prompt(&subject);

    let generation = context(&state)
        .generate::<MarketingPackage>("marketing_package", &prompt)
        .await?;

    Ok(Json(PackageResponse {
        success: true,
        product_id,
        source: generation.source(),
        marketing_package: generation.into_inner(),
        generated_at: Utc::now(),
    }))
}

fn context(state: &AppState) -> GenerationContext<'_> {
    GenerationContext {
        generator: state.generator(),
        audit: state.audit(),
        language: MARKETING_LANGUAGE,
    }
}
