//! One router per resource group. Plain CRUD is the generic handlers from `handlers::crud`.

use crate::handlers::{cars, crud, inventory, orders, purchases, reviews, users};
use crate::models::{
    Car, CarInventory, CarInventoryLog, CarUpdate, Category, CategoryUpdate, Employee, EmployeeUpdate, NewCategory,
    NewCarInventoryLog, NewEmployee, NewOrder, NewShipping, Order, OrderItem, OrderUpdate, Purchase, PurchaseUpdate,
    Review, Shipping, ShippingUpdate, User,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn category_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/categories",
            get(crud::list::<Category>).post(crud::create::<Category, NewCategory>),
        )
        .route(
            "/categories/:id",
            get(crud::read::<Category>)
                .put(crud::update::<Category, CategoryUpdate>)
                .delete(crud::delete::<Category>),
        )
        .with_state(state)
}

pub fn car_routes(state: AppState) -> Router {
    Router::new()
        .route("/cars", get(crud::list::<Car>).post(cars::create_car))
        .route("/cars/top-rated", get(cars::top_rated))
        .route("/cars/new-arrivals", get(cars::new_arrivals))
        .route("/cars/budget-friendly", get(cars::budget_friendly))
        .route("/cars/category/:category_id", get(cars::by_category))
        .route(
            "/cars/:id",
            get(crud::read::<Car>)
                .put(crud::update::<Car, CarUpdate>)
                .delete(cars::delete_car),
        )
        .route("/cars/:id/details", get(cars::details))
        .route("/cars/:id/overview", get(cars::overview))
        .with_state(state)
}

pub fn inventory_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/car_inventory",
            get(crud::list::<CarInventory>).post(inventory::create_inventory),
        )
        .route(
            "/car_inventory/:id",
            get(crud::read::<CarInventory>)
                .patch(inventory::update_for_car)
                .delete(crud::delete::<CarInventory>),
        )
        .route("/car_inventory/cars/:car_id/inventory", get(inventory::for_car))
        .with_state(state)
}

/// Inventory logs are append-only: no update or delete routes.
pub fn inventory_log_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/car_inventory_log",
            get(crud::list::<CarInventoryLog>).post(crud::create::<CarInventoryLog, NewCarInventoryLog>),
        )
        .route("/car_inventory_log/:id", get(crud::read::<CarInventoryLog>))
        .with_state(state)
}

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(crud::list::<User>).post(users::register))
        .route("/users/login", post(users::login))
        .route(
            "/users/:id",
            get(crud::read::<User>)
                .put(users::update_user)
                .delete(crud::delete::<User>),
        )
        .route("/users/:id/all", get(users::activity))
        .route("/users/:id/purchase-for-car/:car_id", get(users::purchase_for_car))
        .with_state(state)
}

pub fn employee_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/employees",
            get(crud::list::<Employee>).post(crud::create::<Employee, NewEmployee>),
        )
        .route(
            "/employees/:id",
            get(crud::read::<Employee>)
                .put(crud::update::<Employee, EmployeeUpdate>)
                .delete(crud::delete::<Employee>),
        )
        .with_state(state)
}

pub fn purchase_routes(state: AppState) -> Router {
    Router::new()
        .route("/purchases", get(crud::list::<Purchase>).post(purchases::create_purchase))
        .route("/purchases/checkout", post(purchases::checkout))
        .route(
            "/purchases/:id",
            get(crud::read::<Purchase>)
                .put(crud::update::<Purchase, PurchaseUpdate>)
                .patch(purchases::pay)
                .delete(crud::delete::<Purchase>),
        )
        .with_state(state)
}

pub fn order_routes(state: AppState) -> Router {
    Router::new()
        .route("/orders", get(crud::list::<Order>).post(crud::create::<Order, NewOrder>))
        .route("/orders/purchase/:purchase_id", get(orders::by_purchase))
        .route(
            "/orders/:id",
            get(crud::read::<Order>)
                .put(crud::update::<Order, OrderUpdate>)
                .delete(crud::delete::<Order>),
        )
        .with_state(state)
}

pub fn order_item_routes(state: AppState) -> Router {
    Router::new()
        .route("/order_items", get(crud::list::<OrderItem>).post(orders::create_item))
        .route("/order_items/by_order/:order_id", get(orders::items_by_order))
        .route(
            "/order_items/:id",
            get(crud::read::<OrderItem>)
                .put(orders::update_item)
                .delete(crud::delete::<OrderItem>),
        )
        .with_state(state)
}

pub fn shipping_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/shippings",
            get(crud::list::<Shipping>).post(crud::create::<Shipping, NewShipping>),
        )
        .route(
            "/shippings/:id",
            get(crud::read::<Shipping>)
                .put(crud::update::<Shipping, ShippingUpdate>)
                .delete(crud::delete::<Shipping>),
        )
        .with_state(state)
}

pub fn review_routes(state: AppState) -> Router {
    Router::new()
        .route("/reviews", get(crud::list::<Review>).post(reviews::create_review))
        .route("/reviews/cars/:car_id/reviews", get(reviews::for_car))
        .route(
            "/reviews/:id",
            get(crud::read::<Review>)
                .put(reviews::update_review)
                .delete(crud::delete::<Review>),
        )
        .with_state(state)
}

/// Every resource group merged.
pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .merge(category_routes(state.clone()))
        .merge(car_routes(state.clone()))
        .merge(inventory_routes(state.clone()))
        .merge(inventory_log_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .merge(employee_routes(state.clone()))
        .merge(purchase_routes(state.clone()))
        .merge(order_routes(state.clone()))
        .merge(order_item_routes(state.clone()))
        .merge(shipping_routes(state.clone()))
        .merge(review_routes(state))
}
