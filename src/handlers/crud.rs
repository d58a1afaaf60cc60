//! Generic list/read/create/update/delete handlers, instantiated per entity in the routers.

use crate::error::AppError;
use crate::models::{Entity, IntoChangeset, Page};
use crate::response::{created, ok};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// GET /<table>?skip=&limit= — page of rows ordered by primary key.
pub async fn list<T>(State(state): State<AppState>, Query(page): Query<Page>) -> Result<impl IntoResponse, AppError>
where
    T: Entity + Serialize + 'static,
{
    let rows: Vec<T> = CrudService::list(&state.pool, page).await?;
    Ok(ok(rows))
}

/// GET /<table>/:id
pub async fn read<T>(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError>
where
    T: Entity + Serialize + 'static,
{
    let row: T = CrudService::get(&state.pool, id).await?;
    Ok(ok(row))
}

/// POST /<table> — 201 with the created row.
pub async fn create<T, P>(State(state): State<AppState>, Json(payload): Json<P>) -> Result<impl IntoResponse, AppError>
where
    T: Entity + Serialize + 'static,
    P: IntoChangeset + DeserializeOwned + Send + 'static,
{
    let row: T = CrudService::create(&state.pool, payload).await?;
    tracing::info!(table = T::TABLE, "row created");
    Ok(created(row))
}

/// PUT /<table>/:id — assigns only the fields present in the body.
pub async fn update<T, P>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<P>,
) -> Result<impl IntoResponse, AppError>
where
    T: Entity + Serialize + 'static,
    P: IntoChangeset + DeserializeOwned + Send + 'static,
{
    let row: T = CrudService::update(&state.pool, id, payload).await?;
    tracing::info!(table = T::TABLE, id, "row updated");
    Ok(ok(row))
}

/// DELETE /<table>/:id — answers the deleted row.
pub async fn delete<T>(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError>
where
    T: Entity + Serialize + 'static,
{
    let row: T = CrudService::delete(&state.pool, id).await?;
    tracing::info!(table = T::TABLE, id, "row deleted");
    Ok(ok(row))
}
