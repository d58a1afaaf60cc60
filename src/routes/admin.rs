use crate::handlers::{admin, crud};
use crate::models::{Employee, Order, OrderItem, Purchase};
use crate::state::AppState;
use axum::{routing::get, routing::put, Router};

/// Back-office routes under `/admin`.
pub fn admin_routes(state: AppState) -> Router {
    let routes = Router::new()
        .route("/cars", get(admin::list_cars).post(admin::create_car))
        .route(
            "/cars/:id",
            get(admin::get_car).put(admin::update_car).delete(admin::delete_car),
        )
        .route("/cars/:id/stock", put(admin::set_stock))
        .route("/users", get(admin::list_users))
        .route(
            "/users/:id",
            get(admin::get_user).put(admin::update_user).delete(admin::delete_user),
        )
        .route("/orders", get(crud::list::<Order>))
        .route("/orders/:id", get(admin::get_order))
        .route("/order-items", get(crud::list::<OrderItem>))
        .route("/order-items/:id", get(crud::read::<OrderItem>))
        .route("/purchases", get(crud::list::<Purchase>))
        .route("/purchases/:id", get(admin::get_purchase))
        .route("/employees", get(crud::list::<Employee>).post(admin::create_employee))
        .route(
            "/employees/:id",
            put(admin::update_employee).delete(admin::delete_employee),
        )
        .with_state(state);
    Router::new().nest("/admin", routes)
}
