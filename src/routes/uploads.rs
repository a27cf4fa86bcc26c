use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use futures_util::TryStreamExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::instrument;
use uuid::Uuid;

use crate::core::config::{CompressionConfig, UploadConfig};
use crate::core::image_service::{is_allowed_image, optimize_upload};
use crate::core::{AdminSession, AppError, AppErrorType, AppSuccessResponse};
use crate::models::uploads::UploadResponse;

fn upload_error(message: &str, cause: impl ToString) -> AppError {
    AppError {
        message: Some(message.to_string()),
        cause: Some(cause.to_string()),
        error_type: AppErrorType::PayloadValidationError,
        details: None,
    }
}

#[instrument(name = "Upload Image", skip(uploads, compression, session, payload), fields(admin = %session.username))]
#[post("/upload")]
pub async fn upload_image(
    uploads: web::Data<UploadConfig>,
    compression: web::Data<CompressionConfig>,
    session: AdminSession,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let upload_dir = PathBuf::from(&uploads.directory);
    fs::create_dir_all(&upload_dir).map_err(|e| {
        tracing::error!("Failed to create upload directory: {:?}", e);
        AppError::internal_error(e)
    })?;

    let max_mb = uploads.max_file_size / (1024 * 1024);
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| upload_error("Invalid file upload format", e))?
    {
        let content_disposition = field.content_disposition();
        let field_name = content_disposition.get_name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" | "file" if file_data.is_none() => {
                let filename = content_disposition
                    .get_filename()
                    .ok_or_else(|| AppError::bad_request("Filename is required"))?
                    .to_string();

                let content_type = field
                    .content_type()
                    .map(|ct| ct.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                if !is_allowed_image(&filename, &content_type) {
                    return Err(AppError::bad_request(
                        "Only image files (JPG, PNG, GIF, WEBP) are allowed",
                    ));
                }

                let mut file_bytes = Vec::new();
                while let Some(chunk) = field
                    .try_next()
                    .await
                    .map_err(|e| upload_error("Failed to read file data", e))?
                {
                    file_bytes.extend_from_slice(&chunk);
                    if file_bytes.len() > uploads.max_file_size {
                        return Err(AppError::bad_request(format!(
                            "File size exceeds maximum limit ({}MB)",
                            max_mb
                        )));
                    }
                }

                file_data = Some((filename, file_bytes));
            }
            _ => {
                // Drain fields we don't use
                while field
                    .try_next()
                    .await
                    .map_err(|e| upload_error("Failed to skip unknown field", e))?
                    .is_some()
                {}
            }
        }
    }

    let (filename, file_bytes) =
        file_data.ok_or_else(|| AppError::bad_request("No image file provided"))?;

    if file_bytes.is_empty() {
        return Err(AppError::bad_request("Uploaded file is empty"));
    }

    let file_extension = Path::new(&filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let original_path = upload_dir.join(format!("upload-{}.{}", Uuid::new_v4(), file_extension));

    let mut file = fs::File::create(&original_path).map_err(|e| {
        tracing::error!("Failed to create file {:?}: {:?}", original_path, e);
        AppError::internal_error(e)
    })?;
    file.write_all(&file_bytes).map_err(|e| {
        tracing::error!("Failed to write file data: {:?}", e);
        AppError::internal_error(e)
    })?;
    drop(file);

    let stored = optimize_upload(
        original_path,
        upload_dir,
        compression.get_ref().clone(),
    )
    .await;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: "Image uploaded successfully".to_string(),
        data: UploadResponse {
            url: stored.url(),
            file_name: stored.file_name.clone(),
            compressed: stored.compressed,
            size_bytes: stored.size_bytes,
            quality: stored.quality,
        },
        pagination: None,
    }))
}
