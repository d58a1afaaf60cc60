//! `/queries` handlers: fixed reports plus a few raw writes.

use crate::error::AppError;
use crate::models::{CarPricing, NewCar, NewUser};
use crate::response::{created, ok};
use crate::service::{PriceComparison, Report, ReportService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// GET /queries/<report>. Bound once per [`Report`] by the router.
pub async fn run_report(state: AppState, report: Report) -> Result<impl IntoResponse, AppError> {
    Ok(ok(ReportService::run(&state.pool, report).await?))
}

/// GET /queries/cars-more-expensive-than-category/:category_id
pub async fn more_expensive_than_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(
        ReportService::compared_to_category(&state.pool, category_id, PriceComparison::AboveAll).await?,
    ))
}

/// GET /queries/cars-cheaper-than-category/:category_id
pub async fn cheaper_than_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(
        ReportService::compared_to_category(&state.pool, category_id, PriceComparison::BelowAny).await?,
    ))
}

/// POST /queries/cars
pub async fn add_car(State(state): State<AppState>, Json(payload): Json<NewCar>) -> Result<impl IntoResponse, AppError> {
    Ok(created(ReportService::add_car(&state.pool, payload).await?))
}

/// POST /queries/users
pub async fn add_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(ReportService::add_user(&state.pool, payload).await?))
}

/// PUT /queries/cars/:car_id
pub async fn reprice_car(
    State(state): State<AppState>,
    Path(car_id): Path<i32>,
    Json(pricing): Json<CarPricing>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(ReportService::reprice_car(&state.pool, car_id, pricing).await?))
}

/// DELETE /queries/users/:email
pub async fn remove_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(ReportService::remove_user_by_email(&state.pool, &email).await?))
}
