//! AI content and Google Cloud proxy handlers.

use artisan_hub_core::{ArtisanId, ContentKind};
use axum::{Json, Router, extract::State, routing::post};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::google::{ImageAnalysis, Translation};
use crate::services::content::{GenerationContext, KindContent};
use crate::services::insights::ArtisanMetrics;
use crate::services::prompts;
use crate::state::AppState;

const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_SPEECH_LANGUAGE: &str = "en-US";
const DEFAULT_PERIOD: &str = "monthly";
const AUTO_DETECT: &str = "auto";

/// Build the AI router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ai/generate", post(generate))
        .route("/api/ai/translate", post(translate))
        .route("/api/ai/speech", post(speech))
        .route("/api/ai/analyze-image", post(analyze_image))
        .route("/api/ai/insights", post(insights))
}

fn bad_request(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

/// A present, non-blank string field.
fn required(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

// =============================================================================
// Content generation
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub content_type: Option<String>,
    #[serde(default)]
    pub product_data: Value,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub content_type: ContentKind,
    pub content: KindContent,
    pub source: &'static str,
    pub language: String,
}

/// Generate one kind of product copy.
///
/// # Errors
///
/// Returns 400 for a missing or unknown content type and 502 when the model
/// call fails.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    let raw_kind = required(body.content_type).ok_or_else(|| bad_request("contentType is required"))?;
    let kind: ContentKind = raw_kind
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid content type: {raw_kind}")))?;
    let language = required(body.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let prompt = prompts::content_prompt(kind, &body.product_data, &language);
    let context = GenerationContext {
        generator: state.generator(),
        audit: state.audit(),
        language: &language,
    };
    let generation = context.generate_kind(kind, &prompt).await?;

    Ok(Json(GenerateResponse {
        success: true,
        content_type: kind,
        source: generation.source(),
        content: generation.into_inner(),
        language,
    }))
}

// =============================================================================
// Translation
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: Option<String>,
    pub target_language: Option<String>,
    pub source_language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    #[serde(flatten)]
    pub translation: Translation,
}

/// Translate text. A source of `auto` lets the service detect it.
///
/// # Errors
///
/// Returns 400 for empty text or target and 502 when the service fails.
pub async fn translate(
    State(state): State<AppState>,
    Json(body): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>> {
    let (Some(text), Some(target)) = (required(body.text), required(body.target_language)) else {
        return Err(bad_request("text and targetLanguage are required"));
    };
    let source = required(body.source_language)
        .filter(|s| !s.eq_ignore_ascii_case(AUTO_DETECT));

    let translation = state
        .translator()
        .translate(&text, source.as_deref(), &target)
        .await?;

    Ok(Json(TranslateResponse {
        success: true,
        translation,
    }))
}

// =============================================================================
// Speech
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRequest {
    pub audio_content: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SpeechResponse {
    pub success: bool,
    pub transcription: String,
}

/// Transcribe a short base64 WEBM/Opus recording.
///
/// # Errors
///
/// Returns 400 when the audio is missing or not base64 and 502 when the
/// service fails.
pub async fn speech(
    State(state): State<AppState>,
    Json(body): Json<SpeechRequest>,
) -> Result<Json<SpeechResponse>> {
    let audio = required(body.audio_content).ok_or_else(|| bad_request("audioContent is required"))?;
    if STANDARD.decode(audio.trim()).is_err() {
        return Err(bad_request("audioContent must be base64 encoded"));
    }
    let language = required(body.language_code).unwrap_or_else(|| DEFAULT_SPEECH_LANGUAGE.to_string());

    let transcription = state.speech().transcribe(audio.trim(), &language).await?;

    Ok(Json(SpeechResponse {
        success: true,
        transcription,
    }))
}

// =============================================================================
// Image annotation
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageRequest {
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeImageResponse {
    pub success: bool,
    #[serde(flatten)]
    pub analysis: ImageAnalysis,
}

/// Label and safety-check a public image.
///
/// # Errors
///
/// Returns 400 unless `imageUrl` is an absolute http(s) URL and 502 when
/// the service fails.
pub async fn analyze_image(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeImageRequest>,
) -> Result<Json<AnalyzeImageResponse>> {
    let raw = required(body.image_url).ok_or_else(|| bad_request("imageUrl is required"))?;
    let url = Url::parse(raw.trim())
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .ok_or_else(|| bad_request("imageUrl must be an absolute http(s) URL"))?;

    let analysis = state.vision().annotate(url.as_str()).await?;

    Ok(Json(AnalyzeImageResponse {
        success: true,
        analysis,
    }))
}

// =============================================================================
// Seller insights
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRequest {
    pub artisan_id: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub success: bool,
    pub period: String,
    pub metrics: ArtisanMetrics,
    pub insights: String,
    pub generated_at: DateTime<Utc>,
}

/// Compute an artisan's metrics and ask the model to interpret them.
///
/// # Errors
///
/// Returns 400 without `artisanId`, 404 for an unknown artisan and 502 when
/// the model call fails.
pub async fn insights(
    State(state): State<AppState>,
    Json(body): Json<InsightsRequest>,
) -> Result<Json<InsightsResponse>> {
    let artisan_id = required(body.artisan_id).ok_or_else(|| bad_request("artisanId is required"))?;
    let period = required(body.period).unwrap_or_else(|| DEFAULT_PERIOD.to_string());

    let catalog = state.catalog();
    let artisan = catalog
        .artisan(&artisan_id)
        .ok_or(AppError::NotFound("Artisan"))?;
    let metrics = ArtisanMetrics::compute(catalog, &ArtisanId::new(artisan_id.as_str()));

    let prompt = prompts::insights_prompt(&artisan.name, &period, &metrics);
    let insights = state.generator().generate(&prompt).await?;

    GenerationContext {
        generator: state.generator(),
        audit: state.audit(),
        language: &artisan.language,
    }
    .audit("insights", &prompt, &insights, false);

    Ok(Json(InsightsResponse {
        success: true,
        period,
        metrics,
        insights,
        generated_at: Utc::now(),
    }))
}
