//! Car catalog handlers beyond plain CRUD.

use crate::error::AppError;
use crate::models::NewCar;
use crate::response::{created, ok};
use crate::service::{CarService, SHOWCASE_LIMIT};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// POST /cars — creates the car and an inventory row with the initial stock.
pub async fn create_car(
    State(state): State<AppState>,
    Json(payload): Json<NewCar>,
) -> Result<impl IntoResponse, AppError> {
    let car = CarService::create(&state.pool, payload).await?;
    Ok(created(car))
}

/// DELETE /cars/:id — removes the car with its inventory.
pub async fn delete_car(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    let car = CarService::delete(&state.pool, id).await?;
    Ok(ok(car))
}

/// GET /cars/top-rated
pub async fn top_rated(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(CarService::top_rated(&state.pool, SHOWCASE_LIMIT).await?))
}

/// GET /cars/new-arrivals
pub async fn new_arrivals(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(CarService::new_arrivals(&state.pool, SHOWCASE_LIMIT).await?))
}

/// GET /cars/budget-friendly
pub async fn budget_friendly(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(CarService::budget_friendly(&state.pool, SHOWCASE_LIMIT).await?))
}

/// GET /cars/category/:category_id — 404 when the category does not exist.
pub async fn by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(CarService::by_category(&state.pool, category_id).await?))
}

/// GET /cars/:id/details
pub async fn details(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(CarService::details(&state.pool, id).await?))
}

/// GET /cars/:id/overview
pub async fn overview(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(CarService::overview(&state.pool, id).await?))
}
