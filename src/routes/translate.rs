use actix_web::{post, web, HttpResponse};

use crate::core::{AdminSession, AppError, AppSuccessResponse, TranslationService};
use crate::models::translations::{TranslateRequest, TranslateResponse};

#[tracing::instrument(name = "Translate Text", skip(translator, _session, request))]
#[post("/translate")]
pub async fn translate_text(
    translator: web::Data<TranslationService>,
    _session: AdminSession,
    request: web::Json<TranslateRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    if request.text.trim().is_empty() {
        return Err(AppError::bad_request("Text is required"));
    }

    let translated = translator.translate_to_english(&request.text).await;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: TranslateResponse {
            original: request.text,
            translated,
        },
        message: "Translation completed".to_string(),
        pagination: None,
    }))
}
