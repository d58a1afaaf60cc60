use crate::error::AppError;
use crate::models::{CheckoutRequest, NewPurchase, PaymentUpdate, Purchase};
use crate::response::{created, ok};
use crate::service::{CrudService, PurchaseService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// POST /purchases
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(payload): Json<NewPurchase>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::non_negative_amount("amount", payload.amount)?;
    RequestValidator::cents("amount", payload.amount)?;
    let purchase: Purchase = CrudService::create(&state.pool, payload).await?;
    tracing::info!(purchase_id = purchase.purchase_id, user_id = purchase.user_id, "purchase created");
    Ok(created(purchase))
}

/// PATCH /purchases/:id — apply a payment of `amount_paid`.
pub async fn pay(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payment): Json<PaymentUpdate>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(PurchaseService::pay(&state.pool, id, payment).await?))
}

/// POST /purchases/checkout — purchase, order and items from a cart in one transaction.
pub async fn checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(PurchaseService::checkout(&state.pool, req).await?))
}
