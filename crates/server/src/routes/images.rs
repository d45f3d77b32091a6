//! Image upload and generation handlers.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::services::images::{
    self, GenerationJob, ImageError, IncomingFile, MAX_FILE_BYTES, MAX_FILES, StoredImage,
};
use crate::state::AppState;

/// Multipart field carrying the files.
pub const UPLOAD_FIELD: &str = "images";

/// Room for a full batch plus multipart framing.
const UPLOAD_BODY_LIMIT: usize = MAX_FILES * MAX_FILE_BYTES + 1024 * 1024;

const DEFAULT_STYLE: &str = "marketing";
const DEFAULT_COUNT: u32 = 3;

/// Build the image router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/images/upload",
            post(upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/images/generate", post(generate))
}

/// Response for a stored batch.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub images: Vec<StoredImage>,
}

/// Accept up to ten images and store originals plus optimized copies.
///
/// # Errors
///
/// Returns 400 when the batch breaks a validation rule (nothing is written
/// then) and 500 when writing or re-encoding fails.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ImageError::Multipart(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if files.len() == MAX_FILES {
            return Err(ImageError::TooManyFiles.into());
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ImageError::Multipart(e.body_text()))?;

        files.push(IncomingFile {
            original_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let stored = images::store_batch(&state.config().uploads_dir, files).await?;

    Ok(Json(UploadResponse {
        success: true,
        message: format!("{} images uploaded successfully", stored.len()),
        images: stored,
    }))
}

/// Image generation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub image_ids: Vec<String>,
    pub style: Option<String>,
    pub count: Option<u32>,
}

/// Queued generation jobs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub message: &'static str,
    pub generated_images: Vec<GenerationJob>,
    pub estimated_time: &'static str,
}

/// Queue styled variants of an uploaded image.
///
/// # Errors
///
/// Returns 400 when `imageIds` is missing or empty.
pub async fn generate(Json(body): Json<GenerateRequest>) -> Result<Json<GenerateResponse>> {
    let Some(source_id) = body.image_ids.first() else {
        return Err(AppError::BadRequest(
            "At least one image ID is required".to_string(),
        ));
    };

    let style = body.style.as_deref().unwrap_or(DEFAULT_STYLE);
    let jobs = images::queue_generation(source_id, style, body.count.unwrap_or(DEFAULT_COUNT));
    tracing::info!(source_id, style, jobs = jobs.len(), "Image generation queued");

    Ok(Json(GenerateResponse {
        success: true,
        message: "AI image generation started",
        generated_images: jobs,
        estimated_time: "2-3 minutes",
    }))
}
