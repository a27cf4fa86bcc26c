use image::imageops::FilterType;
use image::DynamicImage;
use jpeg_encoder::{ColorType, Encoder};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::core::config::CompressionConfig;
use crate::core::telemetry::spawn_blocking_with_tracing;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to encode jpeg: {0}")]
    Encode(#[from] jpeg_encoder::EncodingError),
    #[error("resized image {0}x{1} is too large for the jpeg encoder")]
    Dimensions(u32, u32),
    #[error("compression task failed: {0}")]
    Task(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompressionOutcome {
    pub quality: u8,
    pub size_bytes: u64,
    pub width: u32,
    pub height: u32,
    pub attempts: u32,
}

/// What ended up on disk for an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub file_name: String,
    pub compressed: bool,
    pub size_bytes: u64,
    pub quality: Option<u8>,
}

impl StoredImage {
    pub fn url(&self) -> String {
        format!("/uploads/{}", self.file_name)
    }
}

/// Extension and MIME type must both look like a supported image.
pub fn is_allowed_image(file_name: &str, content_type: &str) -> bool {
    let extension_ok = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);

    extension_ok && content_type.to_lowercase().starts_with("image/")
}

/// Shrink to fit the bounding box, keeping aspect ratio. Never upscales.
pub fn fit_within(image: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if image.width() <= max_width && image.height() <= max_height {
        image.clone()
    } else {
        image.resize(max_width, max_height, FilterType::Lanczos3)
    }
}

fn encode_progressive_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, CompressionError> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(CompressionError::Dimensions(width, height)),
    };

    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer, quality);
    encoder.set_progressive(true);
    encoder.encode(rgb.as_raw(), w, h, ColorType::Rgb)?;

    Ok(buffer)
}

/// Re-encode `input` into `output` until it fits `target_bytes` or the
/// quality floor has been tried. Each attempt redoes resize and encode.
pub fn compress_to_target(
    input: &Path,
    output: &Path,
    config: &CompressionConfig,
) -> Result<CompressionOutcome, CompressionError> {
    let bytes = fs::read(input)?;
    let source = image::load_from_memory(&bytes)?;

    let floor = config.min_quality.min(config.initial_quality);
    let step = config.quality_step.max(1);
    let mut quality = config.initial_quality;
    let mut attempts = 0;

    loop {
        attempts += 1;

        let resized = fit_within(&source, config.max_width, config.max_height);
        let encoded = encode_progressive_jpeg(&resized, quality)?;
        fs::write(output, &encoded)?;
        let size_bytes = fs::metadata(output)?.len();

        tracing::debug!(quality, size_bytes, attempts, "jpeg compression attempt");

        if size_bytes > config.target_bytes && quality > floor {
            quality = quality.saturating_sub(step).max(floor);
            continue;
        }

        return Ok(CompressionOutcome {
            quality,
            size_bytes,
            width: resized.width(),
            height: resized.height(),
            attempts,
        });
    }
}

/// Compress a freshly stored upload. On success the original is deleted;
/// on any failure the original is kept and served as-is.
#[tracing::instrument(name = "Optimize Upload", skip(config))]
pub async fn optimize_upload(
    original: PathBuf,
    upload_dir: PathBuf,
    config: CompressionConfig,
) -> StoredImage {
    let original_name = original
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let compressed_name = format!("{}.jpg", Uuid::new_v4());
    let output = upload_dir.join(&compressed_name);

    let result = {
        let input = original.clone();
        let output = output.clone();
        spawn_blocking_with_tracing(move || compress_to_target(&input, &output, &config))
            .await
            .map_err(|e| CompressionError::Task(e.to_string()))
            .and_then(|r| r)
    };

    match result {
        Ok(outcome) => {
            if let Err(e) = fs::remove_file(&original) {
                tracing::warn!("Failed to remove original upload {:?}: {}", original, e);
            }
            tracing::info!(
                quality = outcome.quality,
                size_bytes = outcome.size_bytes,
                attempts = outcome.attempts,
                "Image compressed to {}",
                compressed_name
            );
            StoredImage {
                file_name: compressed_name,
                compressed: true,
                size_bytes: outcome.size_bytes,
                quality: Some(outcome.quality),
            }
        }
        Err(e) => {
            // The admin UI is not told about this; it just gets the original.
            tracing::warn!("Image compression failed, keeping original: {}", e);
            let _ = fs::remove_file(&output);
            let size_bytes = fs::metadata(&original).map(|m| m.len()).unwrap_or(0);
            StoredImage {
                file_name: original_name,
                compressed: false,
                size_bytes,
                quality: None,
            }
        }
    }
}
