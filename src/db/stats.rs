use crate::core::AppError;
use crate::models::stats::{AdminStats, PublicStats};
use sqlx::SqlitePool;

pub async fn fetch_public_stats(pool: &SqlitePool) -> Result<PublicStats, AppError> {
    let (total_projects, featured_projects): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(CASE WHEN featured THEN 1 ELSE 0 END), 0) FROM tbl_projects",
    )
    .fetch_one(pool)
    .await
    .map_err(AppError::db_error)?;

    let completed_orders: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM tbl_orders WHERE status = 'completed'")
            .fetch_one(pool)
            .await
            .map_err(AppError::db_error)?;

    Ok(PublicStats {
        total_projects,
        featured_projects,
        completed_orders,
    })
}

pub async fn fetch_admin_stats(pool: &SqlitePool) -> Result<AdminStats, AppError> {
    let total_projects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tbl_projects")
        .fetch_one(pool)
        .await
        .map_err(AppError::db_error)?;

    let (total_orders, pending_orders, in_progress_orders, completed_orders, cancelled_orders): (
        i64,
        i64,
        i64,
        i64,
        i64,
    ) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*),
            COALESCE(SUM(CASE WHEN status = 'pending' THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN status = 'in_progress' THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN status = 'cancelled' THEN 1 ELSE 0 END), 0)
        FROM tbl_orders
        "#,
    )
    .fetch_one(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(AdminStats {
        total_projects,
        total_orders,
        pending_orders,
        in_progress_orders,
        completed_orders,
        cancelled_orders,
    })
}
