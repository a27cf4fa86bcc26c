use crate::core::AppError;
use crate::models::common::ServiceCategory;
use crate::models::projects::{
    non_blank, CreateProjectRequest, Project, ProjectListQuery, UpdateProjectRequest,
};
use chrono::Utc;
use sqlx::SqlitePool;

const PROJECT_COLUMNS: &str = "id, title, title_en, description, description_en, category, \
                               image_url, featured, display_order, created_at";

fn parse_category(value: &str) -> Result<ServiceCategory, AppError> {
    value
        .parse::<ServiceCategory>()
        .map_err(AppError::bad_request)
}

pub async fn create_project(
    pool: &SqlitePool,
    request: &CreateProjectRequest,
) -> Result<Project, AppError> {
    let category = parse_category(&request.category)?;

    let result = sqlx::query(
        r#"
        INSERT INTO tbl_projects (title, title_en, description, description_en, category, image_url, featured, display_order, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(request.title.trim())
    .bind(non_blank(request.title_en.as_deref()))
    .bind(request.description.trim())
    .bind(non_blank(request.description_en.as_deref()))
    .bind(category)
    .bind(request.image_url.trim())
    .bind(request.featured.unwrap_or(false))
    .bind(request.order.unwrap_or(0))
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    get_project_by_id(pool, result.last_insert_rowid()).await
}

pub async fn get_project_by_id(pool: &SqlitePool, project_id: i64) -> Result<Project, AppError> {
    let project = sqlx::query_as::<_, Project>(&format!(
        "SELECT {} FROM tbl_projects WHERE id = ?",
        PROJECT_COLUMNS
    ))
    .bind(project_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::db_error)?;

    project.ok_or_else(|| AppError::not_found("Project not found"))
}

pub async fn list_projects(
    pool: &SqlitePool,
    filter: &ProjectListQuery,
) -> Result<Vec<Project>, AppError> {
    let projects = sqlx::query_as::<_, Project>(&format!(
        "SELECT {} FROM tbl_projects \
         WHERE (? IS NULL OR category = ?) AND (? IS NULL OR featured = ?) \
         ORDER BY display_order ASC, id ASC",
        PROJECT_COLUMNS
    ))
    .bind(filter.category)
    .bind(filter.category)
    .bind(filter.featured)
    .bind(filter.featured)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(projects)
}

pub async fn update_project(
    pool: &SqlitePool,
    project_id: i64,
    request: &UpdateProjectRequest,
) -> Result<Project, AppError> {
    let current = get_project_by_id(pool, project_id).await?;

    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .unwrap_or(current.title.as_str());
    let title_en = match &request.title_en {
        Some(value) => non_blank(Some(value.as_str())),
        None => current.title_en.clone(),
    };
    let description = request
        .description
        .as_deref()
        .map(str::trim)
        .unwrap_or(current.description.as_str());
    let description_en = match &request.description_en {
        Some(value) => non_blank(Some(value.as_str())),
        None => current.description_en.clone(),
    };
    let category = match &request.category {
        Some(value) => parse_category(value)?,
        None => current.category,
    };
    let image_url = request
        .image_url
        .as_deref()
        .map(str::trim)
        .unwrap_or(current.image_url.as_str());

    sqlx::query(
        r#"
        UPDATE tbl_projects
        SET title = ?, title_en = ?, description = ?, description_en = ?, category = ?,
            image_url = ?, featured = ?, display_order = ?
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(title_en)
    .bind(description)
    .bind(description_en)
    .bind(category)
    .bind(image_url)
    .bind(request.featured.unwrap_or(current.featured))
    .bind(request.order.unwrap_or(current.display_order))
    .bind(project_id)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    get_project_by_id(pool, project_id).await
}

pub async fn delete_project(pool: &SqlitePool, project_id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM tbl_projects WHERE id = ?")
        .bind(project_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Project not found"));
    }
    Ok(())
}
