use crate::error::AppError;
use crate::models::{NewOrderItem, OrderItem, OrderItemUpdate};
use crate::response::{created, ok};
use crate::service::{CrudService, OrderService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// GET /orders/purchase/:purchase_id
pub async fn by_purchase(
    State(state): State<AppState>,
    Path(purchase_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(OrderService::by_purchase(&state.pool, purchase_id).await?))
}

/// GET /order_items/by_order/:order_id
pub async fn items_by_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(OrderService::items(&state.pool, order_id).await?))
}

/// POST /order_items
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<NewOrderItem>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::positive("quantity", payload.quantity)?;
    let item: OrderItem = CrudService::create(&state.pool, payload).await?;
    tracing::info!(order_item_id = item.order_item_id, order_id = item.order_id, "order item created");
    Ok(created(item))
}

/// PUT /order_items/:id
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<OrderItemUpdate>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(q) = payload.quantity {
        RequestValidator::positive("quantity", q)?;
    }
    let item: OrderItem = CrudService::update(&state.pool, id, payload).await?;
    Ok(ok(item))
}
