use crate::error::AppError;
use crate::models::{NewReview, Page, ReviewUpdate};
use crate::response::{created, ok};
use crate::service::ReviewService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

/// POST /reviews — rating must be 1 to 5.
pub async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<NewReview>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(ReviewService::create(&state.pool, payload).await?))
}

/// PUT /reviews/:id
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ReviewUpdate>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(ReviewService::update(&state.pool, id, payload).await?))
}

/// GET /reviews/cars/:car_id/reviews — visible reviews with the author's username.
pub async fn for_car(
    State(state): State<AppState>,
    Path(car_id): Path<i32>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(ReviewService::visible_for_car(&state.pool, car_id, page).await?))
}
