use crate::core::{
    AdminSession, AppError, AppSuccessResponse, ChangeAction, EventBroadcaster, LiveEvent,
};
use crate::db::projects;
use crate::models::common::MessageResponse;
use crate::models::projects::{CreateProjectRequest, ProjectListQuery, UpdateProjectRequest};
use actix_web::{delete, get, patch, post, web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

#[tracing::instrument(name = "Get Public Projects", skip(pool))]
#[get("/projects")]
pub async fn get_projects(
    pool: web::Data<SqlitePool>,
    query: web::Query<ProjectListQuery>,
) -> Result<HttpResponse, AppError> {
    let projects_list = projects::list_projects(&pool, &query).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: projects_list,
        message: "Projects retrieved successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "List Admin Projects", skip(pool, _session))]
#[get("")]
pub async fn list_admin_projects(
    pool: web::Data<SqlitePool>,
    _session: AdminSession,
    query: web::Query<ProjectListQuery>,
) -> Result<HttpResponse, AppError> {
    let projects_list = projects::list_projects(&pool, &query).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: projects_list,
        message: "Projects retrieved successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get Project", skip(pool, _session))]
#[get("/{project_id}")]
pub async fn get_project(
    pool: web::Data<SqlitePool>,
    _session: AdminSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let project = projects::get_project_by_id(&pool, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: project,
        message: "Project retrieved successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Create Project", skip(pool, broadcaster, session, request), fields(admin = %session.username))]
#[post("")]
pub async fn create_project(
    pool: web::Data<SqlitePool>,
    broadcaster: web::Data<EventBroadcaster>,
    session: AdminSession,
    request: web::Json<CreateProjectRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner().trimmed();
    request.validate()?;

    let project = projects::create_project(&pool, &request).await?;
    broadcaster.publish(LiveEvent::project(project.id, ChangeAction::Created));

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: project,
        message: "Project created successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Update Project", skip(pool, broadcaster, session, request), fields(admin = %session.username))]
#[patch("/{project_id}")]
pub async fn update_project(
    pool: web::Data<SqlitePool>,
    broadcaster: web::Data<EventBroadcaster>,
    session: AdminSession,
    path: web::Path<i64>,
    request: web::Json<UpdateProjectRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner().trimmed();
    request.validate()?;

    let project = projects::update_project(&pool, path.into_inner(), &request).await?;
    broadcaster.publish(LiveEvent::project(project.id, ChangeAction::Updated));

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: project,
        message: "Project updated successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Delete Project", skip(pool, broadcaster, session), fields(admin = %session.username))]
#[delete("/{project_id}")]
pub async fn delete_project(
    pool: web::Data<SqlitePool>,
    broadcaster: web::Data<EventBroadcaster>,
    session: AdminSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    projects::delete_project(&pool, project_id).await?;
    broadcaster.publish(LiveEvent::project(project_id, ChangeAction::Deleted));

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: format!("Project {} deleted", project_id),
        },
        message: "Project deleted successfully".to_string(),
        pagination: None,
    }))
}
