use actix_web::{get, web, HttpResponse};
use sqlx::SqlitePool;

use crate::core::{AdminSession, AppError, AppSuccessResponse};
use crate::db::stats;

#[tracing::instrument(name = "Get Public Stats", skip(pool))]
#[get("/stats")]
pub async fn get_public_stats(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let public_stats = stats::fetch_public_stats(&pool).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: public_stats,
        message: "Stats retrieved successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get Admin Stats", skip(pool, _session))]
#[get("/stats")]
pub async fn get_admin_stats(
    pool: web::Data<SqlitePool>,
    _session: AdminSession,
) -> Result<HttpResponse, AppError> {
    let admin_stats = stats::fetch_admin_stats(&pool).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: admin_stats,
        message: "Stats retrieved successfully".to_string(),
        pagination: None,
    }))
}
