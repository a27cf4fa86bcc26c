use crate::core::AppError;
use crate::models::orders::{NewOrder, Order, OrderStatus, UpdateOrderRequest};
use crate::models::projects::non_blank;
use chrono::Utc;
use sqlx::SqlitePool;

const ORDER_COLUMNS: &str = "id, name, contact, service_category, sub_service, topic, deadline, \
                             budget, status, notes, created_at, updated_at";

pub async fn create_order(pool: &SqlitePool, order: &NewOrder) -> Result<Order, AppError> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO tbl_orders (name, contact, service_category, sub_service, topic, deadline, budget, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&order.name)
    .bind(&order.contact)
    .bind(order.service_category)
    .bind(&order.sub_service)
    .bind(&order.topic)
    .bind(&order.deadline)
    .bind(&order.budget)
    .bind(OrderStatus::Pending)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    get_order_by_id(pool, result.last_insert_rowid()).await
}

pub async fn get_order_by_id(pool: &SqlitePool, order_id: i64) -> Result<Order, AppError> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {} FROM tbl_orders WHERE id = ?",
        ORDER_COLUMNS
    ))
    .bind(order_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::db_error)?;

    order.ok_or_else(|| AppError::not_found("Order not found"))
}

// Newest first
pub async fn list_orders(
    pool: &SqlitePool,
    status: Option<OrderStatus>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Order>, AppError> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {} FROM tbl_orders WHERE (? IS NULL OR status = ?) \
         ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        ORDER_COLUMNS
    ))
    .bind(status)
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(orders)
}

pub async fn count_orders(pool: &SqlitePool, status: Option<OrderStatus>) -> Result<i64, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tbl_orders WHERE (? IS NULL OR status = ?)")
        .bind(status)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(AppError::db_error)
}

/// Status and notes are the only admin-editable fields. Last write wins.
pub async fn update_order(
    pool: &SqlitePool,
    order_id: i64,
    request: &UpdateOrderRequest,
) -> Result<Order, AppError> {
    let current = get_order_by_id(pool, order_id).await?;

    let status = request.status.unwrap_or(current.status);
    let notes = match &request.notes {
        Some(notes) => non_blank(Some(notes.as_str())),
        None => current.notes,
    };

    sqlx::query("UPDATE tbl_orders SET status = ?, notes = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(notes)
        .bind(Utc::now())
        .bind(order_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    get_order_by_id(pool, order_id).await
}

pub async fn delete_order(pool: &SqlitePool, order_id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM tbl_orders WHERE id = ?")
        .bind(order_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Order not found"));
    }
    Ok(())
}
