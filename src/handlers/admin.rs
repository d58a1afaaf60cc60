//! Back-office handlers. Mutations answer a short acknowledgement instead of the row.

use crate::error::AppError;
use crate::models::{Car, CarUpdate, Employee, EmployeeUpdate, NewCar, NewEmployee, Page, StockUpdate, User, UserUpdate};
use crate::response::{ack, ok};
use crate::service::{
    CarService, CrudService, InventoryService, OrderService, PurchaseService, RequestValidator, UserService,
};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// GET /admin/cars — every car with its stock.
pub async fn list_cars(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(CarService::list_with_stock(&state.pool).await?))
}

/// GET /admin/cars/:id
pub async fn get_car(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(CarService::get_with_stock(&state.pool, id).await?))
}

/// POST /admin/cars
pub async fn create_car(
    State(state): State<AppState>,
    Json(payload): Json<NewCar>,
) -> Result<impl IntoResponse, AppError> {
    let car = CarService::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, ack("Car", "created", "car_id", car.car_id)))
}

/// PUT /admin/cars/:id
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CarUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let car: Car = CrudService::update(&state.pool, id, payload).await?;
    tracing::info!(car_id = car.car_id, "car updated");
    Ok(ack("Car", "updated", "car_id", car.car_id))
}

/// PUT /admin/cars/:id/stock — sets the absolute quantity.
pub async fn set_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<StockUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let _: Car = CrudService::get(&state.pool, id).await?;
    InventoryService::set_stock(&state.pool, id, payload.quantity).await?;
    Ok(ack("Stock", "updated", "car_id", id))
}

/// DELETE /admin/cars/:id
pub async fn delete_car(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    let car = CarService::delete(&state.pool, id).await?;
    Ok(ack("Car", "deleted", "car_id", car.car_id))
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, AppError> {
    let users: Vec<User> = CrudService::list(&state.pool, page).await?;
    Ok(ok(users))
}

/// GET /admin/users/:id — with purchases and reviews.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(UserService::details(&state.pool, id).await?))
}

/// PUT /admin/users/:id
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
    Ok(ack("User", "updated", "user_id", user.user_id))
}

/// DELETE /admin/users/:id
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    let user: User = CrudService::delete(&state.pool, id).await?;
    tracing::info!(user_id = user.user_id, "user deleted");
    Ok(ack("User", "deleted", "user_id", user.user_id))
}

/// GET /admin/orders/:id — with its items.
pub async fn get_order(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(OrderService::with_items(&state.pool, id).await?))
}

/// GET /admin/purchases/:id — with orders and the buyer.
pub async fn get_purchase(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(PurchaseService::details(&state.pool, id).await?))
}

/// POST /admin/employees
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<NewEmployee>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::email("email", &payload.email)?;
    let emp: Employee = CrudService::create(&state.pool, payload).await?;
    tracing::info!(emp_id = emp.emp_id, "employee created");
    Ok((StatusCode::CREATED, ack("Employee", "created", "emp_id", emp.emp_id)))
}

/// PUT /admin/employees/:id
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<EmployeeUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let emp: Employee = CrudService::update(&state.pool, id, payload).await?;
    tracing::info!(emp_id = emp.emp_id, "employee updated");
    Ok(ack("Employee", "updated", "emp_id", emp.emp_id))
}

/// DELETE /admin/employees/:id
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let emp: Employee = CrudService::delete(&state.pool, id).await?;
    tracing::info!(emp_id = emp.emp_id, "employee deleted");
    Ok(ack("Employee", "deleted", "emp_id", emp.emp_id))
}
