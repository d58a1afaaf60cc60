//! Router builders, one per route group.

mod admin;
mod common;
mod queries;
mod resources;

pub use admin::admin_routes;
pub use common::common_routes;
pub use queries::query_routes;
pub use resources::{
    car_routes, category_routes, employee_routes, inventory_log_routes, inventory_routes, order_item_routes,
    order_routes, purchase_routes, resource_routes, review_routes, shipping_routes, user_routes,
};
