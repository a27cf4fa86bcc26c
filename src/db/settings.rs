use crate::core::AppError;
use crate::models::settings::Setting;
use chrono::Utc;
use sqlx::SqlitePool;

pub async fn fetch_settings(pool: &SqlitePool) -> Result<Vec<Setting>, AppError> {
    sqlx::query_as::<_, Setting>("SELECT key, value, updated_at FROM tbl_settings ORDER BY key")
        .fetch_all(pool)
        .await
        .map_err(AppError::db_error)
}

pub async fn upsert_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<Setting, AppError> {
    sqlx::query(
        r#"
        INSERT INTO tbl_settings (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    sqlx::query_as::<_, Setting>("SELECT key, value, updated_at FROM tbl_settings WHERE key = ?")
        .bind(key)
        .fetch_one(pool)
        .await
        .map_err(AppError::db_error)
}
