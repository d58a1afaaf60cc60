//! Inventory handlers keyed by car.

use crate::error::AppError;
use crate::models::{CarInventory, CarInventoryUpdate, NewCarInventory, Page};
use crate::response::{created, ok};
use crate::service::{CrudService, InventoryService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

/// POST /car_inventory
pub async fn create_inventory(
    State(state): State<AppState>,
    Json(payload): Json<NewCarInventory>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::non_negative("quantity", payload.quantity)?;
    let row: CarInventory = CrudService::create(&state.pool, payload).await?;
    tracing::info!(inventory_id = row.inventory_id, car_id = row.car_id, "inventory created");
    Ok(created(row))
}

/// PATCH /car_inventory/:car_id — the path segment is a car id here, unlike GET and DELETE.
pub async fn update_for_car(
    State(state): State<AppState>,
    Path(car_id): Path<i32>,
    Json(payload): Json<CarInventoryUpdate>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(InventoryService::update_for_car(&state.pool, car_id, payload).await?))
}

/// GET /car_inventory/cars/:car_id/inventory
pub async fn for_car(
    State(state): State<AppState>,
    Path(car_id): Path<i32>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(InventoryService::for_car(&state.pool, car_id, page).await?))
}
