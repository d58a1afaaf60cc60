use crate::error::AppError;
use crate::models::{LoginRequest, NewUser, User, UserUpdate};
use crate::response::{created, ok};
use crate::service::{CrudService, RequestValidator, UserService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// POST /users — register; 400 on duplicate email or username.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(UserService::register(&state.pool, payload).await?))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(UserService::login(&state.pool, payload).await?))
}

/// PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UserUpdate>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(email) = payload.email.as_deref() {
        RequestValidator::email("email", email)?;
    }
    let user: User = CrudService::update(&state.pool, id, payload).await?;
    tracing::info!(user_id = user.user_id, "user updated");
    Ok(ok(user))
}

/// GET /users/:id/all — the user with review and purchase summaries.
pub async fn activity(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(UserService::activity(&state.pool, id).await?))
}

/// GET /users/:id/purchase-for-car/:car_id
pub async fn purchase_for_car(
    State(state): State<AppState>,
    Path((user_id, car_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(UserService::purchase_for_car(&state.pool, user_id, car_id).await?))
}
