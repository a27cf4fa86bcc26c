use actix_web::{get, put, web, HttpResponse};
use sqlx::SqlitePool;
use tracing::instrument;
use validator::Validate;

use crate::core::{AdminSession, AppError, AppSuccessResponse, EventBroadcaster, LiveEvent};
use crate::db::settings;
use crate::models::settings::{is_valid_setting_key, UpdateSettingRequest};

#[instrument(name = "Get Site Settings", skip(pool))]
#[get("/settings")]
pub async fn get_site_settings(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let all = settings::fetch_settings(&pool).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: all,
        message: "Site settings retrieved successfully".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Get Admin Settings", skip(pool, _session))]
#[get("/settings")]
pub async fn get_admin_settings(
    pool: web::Data<SqlitePool>,
    _session: AdminSession,
) -> Result<HttpResponse, AppError> {
    let all = settings::fetch_settings(&pool).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: all,
        message: "Site settings retrieved successfully".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Update Setting", skip(pool, broadcaster, _session, request))]
#[put("/settings/{key}")]
pub async fn update_setting(
    pool: web::Data<SqlitePool>,
    broadcaster: web::Data<EventBroadcaster>,
    _session: AdminSession,
    path: web::Path<String>,
    request: web::Json<UpdateSettingRequest>,
) -> Result<HttpResponse, AppError> {
    let key = path.into_inner();
    if !is_valid_setting_key(&key) {
        return Err(AppError::bad_request(
            "Setting keys may only contain letters, digits, '_', '-' and '.'",
        ));
    }
    request.validate()?;

    let setting = settings::upsert_setting(&pool, &key, &request.value).await?;
    broadcaster.publish(LiveEvent::settings(&setting.key, &setting.value));

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: setting,
        message: "Setting updated successfully".to_string(),
        pagination: None,
    }))
}
