//! Image ingestion: batch validation, storage and JPEG optimization.
//!
//! # Flow
//!
//! ```text
//! multipart field `images` ─► IncomingFile[] ─► validate_batch ─► store_batch
//!                                                   │                 │
//!                                          any violation ⇒ 400   per file:
//!                                          nothing written       {uuid}.{ext}
//!                                                                optimized_{uuid}.jpg
//! ```
//!
//! The optimized copy fits inside 800×600 with its aspect ratio kept and is
//! never enlarged. Decoding and encoding run on the blocking pool. A failure
//! part-way through a batch leaves already written files in place.

use std::path::Path;

use chrono::{DateTime, Utc};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Maximum files per upload.
pub const MAX_FILES: usize = 10;

/// Maximum size of a single file in bytes.
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// Bounding box of the optimized copy.
pub const OPTIMIZED_MAX_WIDTH: u32 = 800;
pub const OPTIMIZED_MAX_HEIGHT: u32 = 600;

/// JPEG quality of the optimized copy.
pub const OPTIMIZED_QUALITY: u8 = 85;

/// Public URL prefix of the uploads directory.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

const ALLOWED_TYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Errors from image upload and processing.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The request carried no image files.
    #[error("No images uploaded")]
    NoFiles,

    /// More than [`MAX_FILES`] files.
    #[error("Too many files: at most {MAX_FILES} images per upload")]
    TooManyFiles,

    /// A file exceeds [`MAX_FILE_BYTES`].
    #[error("File too large: {0} exceeds the 5 MB limit")]
    FileTooLarge(String),

    /// Extension or MIME type outside the allowed set.
    #[error("Only image files are allowed: {0}")]
    UnsupportedType(String),

    /// The multipart body could not be read.
    #[error("Malformed upload: {0}")]
    Multipart(String),

    /// Writing to the uploads directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding failed.
    #[error("Image processing failed: {0}")]
    Processing(#[from] image::ImageError),

    /// The blocking task panicked or was cancelled.
    #[error("Image task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ImageError {
    /// Whether the error is the client's fault.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoFiles
                | Self::TooManyFiles
                | Self::FileTooLarge(_)
                | Self::UnsupportedType(_)
                | Self::Multipart(_)
        )
    }
}

/// A file received in the upload, held in memory until validated.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub original_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    /// Lowercase extension without the dot, if any.
    fn extension(&self) -> Option<String> {
        Path::new(&self.original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }

    fn has_allowed_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ALLOWED_TYPES.contains(&ext.as_str()))
    }

    fn has_allowed_mime(&self) -> bool {
        let mime = self.content_type.to_ascii_lowercase();
        mime.strip_prefix("image/")
            .map(|sub| sub.split(';').next().unwrap_or_default().trim())
            .is_some_and(|sub| ALLOWED_TYPES.contains(&sub))
    }
}

/// Metadata returned for each stored image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub id: Uuid,
    pub original_name: String,
    pub filename: String,
    pub optimized_filename: String,
    /// Original file size in bytes.
    pub size: usize,
    pub mimetype: String,
    /// Dimensions of the original image.
    pub width: u32,
    pub height: u32,
    pub path: String,
    pub optimized_path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Check every file of a batch before anything is written.
///
/// # Errors
///
/// Returns the first violation found: no files, too many files, a file over
/// the size limit, or a disallowed extension or MIME type.
pub fn validate_batch(files: &[IncomingFile]) -> Result<(), ImageError> {
    if files.is_empty() {
        return Err(ImageError::NoFiles);
    }
    if files.len() > MAX_FILES {
        return Err(ImageError::TooManyFiles);
    }

    for file in files {
        if file.bytes.len() > MAX_FILE_BYTES {
            return Err(ImageError::FileTooLarge(file.original_name.clone()));
        }
        if !file.has_allowed_extension() || !file.has_allowed_mime() {
            return Err(ImageError::UnsupportedType(file.original_name.clone()));
        }
    }

    Ok(())
}

/// Validate and store a batch under `dir`.
///
/// # Errors
///
/// Returns a validation error before any write, or an I/O or processing
/// error from the file being handled when it failed.
pub async fn store_batch(dir: &Path, files: Vec<IncomingFile>) -> Result<Vec<StoredImage>, ImageError> {
    validate_batch(&files)?;
    tokio::fs::create_dir_all(dir).await?;

    let mut stored = Vec::with_capacity(files.len());
    for file in files {
        stored.push(store_one(dir, file).await?);
    }

    tracing::info!(count = stored.len(), dir = %dir.display(), "Images stored");
    Ok(stored)
}

async fn store_one(dir: &Path, file: IncomingFile) -> Result<StoredImage, ImageError> {
    let id = Uuid::new_v4();
    let suffix = file.extension().map(|e| format!(".{e}")).unwrap_or_default();
    let filename = format!("{id}{suffix}");
    let optimized_filename = format!("optimized_{id}.jpg");

    tokio::fs::write(dir.join(&filename), &file.bytes).await?;

    let optimized_path = dir.join(&optimized_filename);
    let IncomingFile {
        original_name,
        content_type,
        bytes,
    } = file;
    let size = bytes.len();
    let (width, height) =
        tokio::task::spawn_blocking(move || optimize(&bytes, &optimized_path)).await??;

    tracing::debug!(%id, original_name, width, height, "Image optimized");

    Ok(StoredImage {
        id,
        original_name,
        path: format!("{UPLOADS_URL_PREFIX}/{filename}"),
        optimized_path: format!("{UPLOADS_URL_PREFIX}/{optimized_filename}"),
        filename,
        optimized_filename,
        size,
        mimetype: content_type,
        width,
        height,
        uploaded_at: Utc::now(),
    })
}

/// Decode, bound and re-encode as JPEG. Returns the original dimensions.
fn optimize(bytes: &[u8], output: &Path) -> Result<(u32, u32), ImageError> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = (img.width(), img.height());

    let bounded = if width > OPTIMIZED_MAX_WIDTH || height > OPTIMIZED_MAX_HEIGHT {
        img.resize(OPTIMIZED_MAX_WIDTH, OPTIMIZED_MAX_HEIGHT, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(bounded.to_rgb8());
    let file = std::fs::File::create(output)?;
    let writer = std::io::BufWriter::new(file);
    rgb.write_with_encoder(JpegEncoder::new_with_quality(writer, OPTIMIZED_QUALITY))?;

    Ok((width, height))
}

// =============================================================================
// Generation placeholder
// =============================================================================

/// Styled variants an image generation job can produce.
pub const MAX_GENERATED: u32 = 10;

/// A queued image generation job. No generation backend exists yet, so jobs
/// stay in `processing`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationJob {
    pub id: Uuid,
    pub original_image_id: String,
    pub style: String,
    pub filename: String,
    pub path: String,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
}

/// Queue `count` jobs (clamped to 1..=10) derived from `source_id`.
#[must_use]
pub fn queue_generation(source_id: &str, style: &str, count: u32) -> Vec<GenerationJob> {
    (0..count.clamp(1, MAX_GENERATED))
        .map(|_| {
            let id = Uuid::new_v4();
            let filename = format!("generated_{id}.jpg");
            GenerationJob {
                id,
                original_image_id: source_id.to_string(),
                style: style.to_string(),
                path: format!("{UPLOADS_URL_PREFIX}/{filename}"),
                filename,
                status: "processing",
                created_at: Utc::now(),
            }
        })
        .collect()
}
