use crate::core::AppError;
use crate::models::admins::{Admin, SetupRequest};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use sqlx::SqlitePool;

const ADMIN_COLUMNS: &str = "id, username, password_hash, email, role, created_at";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::internal_error("Failed to hash password"))?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::internal_error("Invalid password hash"))?;

    let argon2 = Argon2::default();
    Ok(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok())
}

pub async fn count_admins(pool: &SqlitePool) -> Result<i64, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tbl_admins")
        .fetch_one(pool)
        .await
        .map_err(AppError::db_error)
}

/// Insert the first admin. Returns `None` when an admin already exists; the
/// check and the insert are one statement so two racing setups cannot both win.
pub async fn create_initial_admin(
    pool: &SqlitePool,
    request: &SetupRequest,
) -> Result<Option<Admin>, AppError> {
    let password_hash = hash_password(&request.password)?;

    let result = sqlx::query(
        r#"
        INSERT INTO tbl_admins (username, password_hash, email, role, created_at)
        SELECT ?, ?, ?, 'admin', ?
        WHERE NOT EXISTS (SELECT 1 FROM tbl_admins)
        "#,
    )
    .bind(request.username.trim())
    .bind(password_hash)
    .bind(request.email.trim())
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_admin_by_id(pool, result.last_insert_rowid()).await.map(Some)
}

pub async fn get_admin_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<Admin>, AppError> {
    sqlx::query_as::<_, Admin>(&format!(
        "SELECT {} FROM tbl_admins WHERE username = ?",
        ADMIN_COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(AppError::db_error)
}

pub async fn get_admin_by_id(pool: &SqlitePool, admin_id: i64) -> Result<Admin, AppError> {
    let admin = sqlx::query_as::<_, Admin>(&format!(
        "SELECT {} FROM tbl_admins WHERE id = ?",
        ADMIN_COLUMNS
    ))
    .bind(admin_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::db_error)?;

    admin.ok_or_else(|| AppError::not_found("Admin not found"))
}

pub async fn change_admin_password(
    pool: &SqlitePool,
    admin_id: i64,
    new_password: &str,
) -> Result<(), AppError> {
    let password_hash = hash_password(new_password)?;

    sqlx::query("UPDATE tbl_admins SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(admin_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(())
}
