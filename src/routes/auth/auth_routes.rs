use crate::core::{AdminSession, AppError, AppSuccessResponse, SessionStore};
use crate::db::admins;
use crate::models::admins::{
    AdminProfile, ChangePasswordRequest, LoginRequest, SessionStatus, SetupRequest,
};
use crate::models::common::MessageResponse;
use actix_web::{get, post, web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[tracing::instrument(name = "Setup Admin", skip(pool, request))]
#[post("/setup")]
pub async fn setup_admin(
    pool: web::Data<SqlitePool>,
    request: web::Json<SetupRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let existing = admins::count_admins(&pool).await?;
    if existing > 0 {
        tracing::warn!(existing, "Admin setup attempted after setup was completed");
        return Err(AppError::forbidden_error("Admin account already exists"));
    }

    let admin = admins::create_initial_admin(&pool, &request)
        .await?
        .ok_or_else(|| AppError::forbidden_error("Admin account already exists"))?;

    tracing::info!(admin_id = admin.id, "Initial admin account created");

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: AdminProfile::from(admin),
        message: "Admin account created successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Admin Login", skip(pool, sessions, request), fields(username = %request.username))]
#[post("/login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    sessions: web::Data<SessionStore>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let admin = match admins::get_admin_by_username(&pool, request.username.trim()).await? {
        Some(admin) => admin,
        None => return Err(AppError::unauthorized(INVALID_CREDENTIALS)),
    };

    if !admins::verify_password(&request.password, &admin.password_hash)? {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = sessions.create(&admin)?;

    Ok(HttpResponse::Ok()
        .cookie(sessions.session_cookie(&token))
        .json(AppSuccessResponse {
            success: true,
            data: AdminProfile::from(admin),
            message: "Login successful".to_string(),
            pagination: None,
        }))
}

#[tracing::instrument(name = "Admin Logout", skip(sessions, session))]
#[post("/logout")]
pub async fn logout(
    sessions: web::Data<SessionStore>,
    session: Option<AdminSession>,
) -> Result<HttpResponse, AppError> {
    if let Some(session) = session {
        sessions.remove(&session.token)?;
    }

    Ok(HttpResponse::Ok()
        .cookie(sessions.removal_cookie())
        .json(AppSuccessResponse {
            success: true,
            data: MessageResponse {
                message: "Logged out".to_string(),
            },
            message: "Logout successful".to_string(),
            pagination: None,
        }))
}

#[tracing::instrument(name = "Check Admin Session", skip(pool, session))]
#[get("/session")]
pub async fn session_status(
    pool: web::Data<SqlitePool>,
    session: Option<AdminSession>,
) -> Result<HttpResponse, AppError> {
    let admin = match session {
        Some(session) => admins::get_admin_by_id(&pool, session.admin_id)
            .await
            .ok()
            .map(AdminProfile::from),
        None => None,
    };

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: SessionStatus {
            authenticated: admin.is_some(),
            admin,
        },
        message: "Session status retrieved".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Change Admin Password", skip(pool, session, request), fields(admin = %session.username))]
#[post("/change-password")]
pub async fn change_password(
    pool: web::Data<SqlitePool>,
    session: AdminSession,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let admin = admins::get_admin_by_id(&pool, session.admin_id).await?;

    if !admins::verify_password(&request.current_password, &admin.password_hash)? {
        return Err(AppError::unauthorized(
            "The current password you provided is incorrect",
        ));
    }

    request.validate()?;

    admins::change_admin_password(&pool, admin.id, &request.new_password).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Password changed successfully".to_string(),
        },
        message: "Password changed successfully".to_string(),
        pagination: None,
    }))
}
