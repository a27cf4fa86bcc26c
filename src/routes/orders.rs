use crate::core::{
    AdminSession, AppError, AppSuccessResponse, ChangeAction, EventBroadcaster, LiveEvent,
    WebhookService,
};
use crate::db::orders;
use crate::models::common::MessageResponse;
use crate::models::orders::{CreateOrderRequest, NewOrder, OrderListQuery, UpdateOrderRequest};
use crate::models::pagination::PaginationMeta;
use actix_web::{delete, get, patch, post, web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

/// Public order form. Once the order is stored the submitter always gets a
/// success; the webhook and the live broadcast cannot change that.
#[tracing::instrument(
    name = "Submit Order",
    skip(pool, webhook, broadcaster, request),
    fields(service_category = %request.service_category)
)]
#[post("/order")]
pub async fn submit_order(
    pool: web::Data<SqlitePool>,
    webhook: web::Data<WebhookService>,
    broadcaster: web::Data<EventBroadcaster>,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let new_order = NewOrder::try_from(request.into_inner()).map_err(|errors| {
        tracing::warn!("Order submission rejected: {:?}", errors);
        AppError::from(errors)
    })?;

    let order = orders::create_order(&pool, &new_order).await?;
    tracing::info!(order_id = order.id, "Order saved");

    match webhook.notify_new_order(&order).await {
        Ok(true) => {}
        Ok(false) => tracing::debug!("No webhook configured, skipping order notification"),
        Err(e) => tracing::error!(order_id = order.id, "Failed to send order notification: {}", e),
    }

    broadcaster.publish(LiveEvent::order(order.id, ChangeAction::Created));

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: order,
        message: "Order submitted successfully!".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "List Orders", skip(pool, _session))]
#[get("")]
pub async fn list_orders(
    pool: web::Data<SqlitePool>,
    _session: AdminSession,
    query: web::Query<OrderListQuery>,
) -> Result<HttpResponse, AppError> {
    let pagination = query.pagination();

    let orders_list =
        orders::list_orders(&pool, query.status, pagination.per_page, pagination.offset()).await?;
    let total = orders::count_orders(&pool, query.status).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: orders_list,
        message: "Orders retrieved successfully".to_string(),
        pagination: Some(PaginationMeta::new(pagination.page, pagination.per_page, total)),
    }))
}

#[tracing::instrument(name = "Get Order", skip(pool, _session))]
#[get("/{order_id}")]
pub async fn get_order(
    pool: web::Data<SqlitePool>,
    _session: AdminSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let order = orders::get_order_by_id(&pool, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: order,
        message: "Order retrieved successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Update Order", skip(pool, broadcaster, _session, request))]
#[patch("/{order_id}")]
pub async fn update_order(
    pool: web::Data<SqlitePool>,
    broadcaster: web::Data<EventBroadcaster>,
    _session: AdminSession,
    path: web::Path<i64>,
    request: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let order = orders::update_order(&pool, path.into_inner(), &request).await?;
    broadcaster.publish(LiveEvent::order(order.id, ChangeAction::Updated));

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: order,
        message: "Order updated successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Delete Order", skip(pool, broadcaster, _session))]
#[delete("/{order_id}")]
pub async fn delete_order(
    pool: web::Data<SqlitePool>,
    broadcaster: web::Data<EventBroadcaster>,
    _session: AdminSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    orders::delete_order(&pool, order_id).await?;
    broadcaster.publish(LiveEvent::order(order_id, ChangeAction::Deleted));

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: format!("Order {} deleted", order_id),
        },
        message: "Order deleted successfully".to_string(),
        pagination: None,
    }))
}
