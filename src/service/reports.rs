//! Fixed reporting statements. Rows come back as JSON objects keyed by the select list.

use super::{CarService, UserService};
use crate::error::AppError;
use crate::models::{CarPricing, NewCar, NewUser, UserIdentity};
use crate::sql::{row_to_json, rows_to_json};
use serde_json::{json, Value};
use sqlx::PgPool;

const AVAILABLE_CARS_WITH_CATEGORY: &str = "\
    SELECT c.model_name, c.manufacturer, c.year, c.price, cat.name AS category_name \
    FROM cars c \
    JOIN categories cat ON cat.category_id = c.category_id \
    WHERE c.available = TRUE \
    ORDER BY c.car_id";

const USERS_AND_PURCHASES: &str = "\
    SELECT u.username, p.purchase_id, p.amount, p.purchase_date AS date \
    FROM users u \
    LEFT OUTER JOIN purchase p ON u.user_id = p.user_id \
    WHERE p.status = 'paid' OR p.purchase_id IS NULL \
    ORDER BY u.user_id, p.purchase_id";

const ORDER_DETAILS_WITH_CAR_INFO: &str = "\
    SELECT o.order_id, o.order_date, c.model_name \
    FROM orders o \
    JOIN order_item oi USING (order_id) \
    JOIN cars c USING (car_id) \
    WHERE o.status = 'processing' \
    ORDER BY o.order_id, oi.order_item_id";

const USERS_WITH_COMPLETED_PURCHASES: &str = "\
    SELECT u.username, u.email \
    FROM users u \
    WHERE EXISTS ( \
        SELECT 1 FROM purchase p \
        WHERE p.user_id = u.user_id AND p.status = 'paid' \
    ) \
    ORDER BY u.user_id";

const CARS_MORE_EXPENSIVE_THAN_CATEGORY: &str = "\
    SELECT model_name, price \
    FROM cars \
    WHERE price > ALL (SELECT price FROM cars WHERE category_id = $1) \
    ORDER BY price DESC";

const EMPLOYEES_AND_ORDERS_HANDLED: &str = "\
    SELECT e.emp_id, e.name, e.position, \
        (SELECT COUNT(*) FROM shippings s WHERE s.emp_id = e.emp_id) AS total_shipments, \
        (SELECT COUNT(*) FROM shippings s WHERE s.emp_id = e.emp_id AND s.status = 'delivered') \
            AS deliveries_completed \
    FROM employees e \
    WHERE e.status = 'active' \
    ORDER BY deliveries_completed DESC, total_shipments DESC, e.name";

const TOP_5_MOST_REVIEWED_CARS: &str = "\
    WITH car_reviews AS ( \
        SELECT c.model_name, c.manufacturer, COUNT(r.review_id) AS review_count \
        FROM cars c \
        LEFT JOIN reviews r ON c.car_id = r.car_id \
        GROUP BY c.model_name, c.manufacturer \
    ) \
    SELECT model_name, manufacturer, review_count \
    FROM car_reviews \
    ORDER BY review_count DESC, model_name \
    LIMIT 5";

const AVAILABLE_CARS_AND_INVENTORY: &str = "\
    SELECT c.model_name, c.manufacturer, ci.quantity, ci.location \
    FROM cars c \
    INNER JOIN car_inventory ci ON c.car_id = ci.car_id \
    WHERE c.available = TRUE AND ci.quantity > 0 \
    ORDER BY ci.quantity DESC, c.car_id";

const EMPLOYEES_AND_SHIPPING_RECORDS: &str = "\
    SELECT e.emp_id, e.name AS employee_name, e.department, \
        s.shipping_id AS ship_id, s.shipping_provider, s.status AS shipping_status, \
        s.shipped_date, s.delivery_date \
    FROM shippings s \
    RIGHT OUTER JOIN employees e ON s.emp_id = e.emp_id \
    WHERE e.status = 'active' \
    ORDER BY s.shipped_date DESC NULLS LAST, e.emp_id";

const VISIBLE_REVIEWS: &str = "\
    SELECT r.review_id, r.rating, r.review_text, u.username, c.model_name \
    FROM reviews r \
    JOIN users u USING (user_id) \
    JOIN cars c USING (car_id) \
    WHERE r.is_visible = TRUE \
    ORDER BY r.created_at DESC, r.review_id DESC";

const ELECTRIC_OR_HYBRID_CARS: &str = "\
    SELECT model_name, manufacturer, engine_type \
    FROM cars \
    WHERE engine_type ~* '^(electric|hybrid)$' AND available = TRUE \
    ORDER BY model_name";

const REPRICE_CAR: &str = "\
    UPDATE cars \
    SET price = $1, available = $2, added_date = CURRENT_DATE \
    WHERE car_id = $3 \
    RETURNING car_id, model_name, price, available";

const CARS_CHEAPER_THAN_CATEGORY: &str = "\
    SELECT c.car_id, c.model_name, c.manufacturer, c.price \
    FROM cars c \
    WHERE c.price < ANY (SELECT c2.price FROM cars c2 WHERE c2.category_id = $1) \
    ORDER BY c.price ASC";

/// A parameterless reporting query exposed under `/queries/<path>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    AvailableCarsWithCategory,
    UsersAndPurchases,
    OrderDetailsWithCarInfo,
    UsersWithCompletedPurchases,
    EmployeesAndOrdersHandled,
    Top5MostReviewedCars,
    AvailableCarsAndInventory,
    EmployeesAndShippingRecords,
    VisibleReviews,
    ElectricOrHybridCars,
}

impl Report {
    pub const ALL: [Report; 10] = [
        Report::AvailableCarsWithCategory,
        Report::UsersAndPurchases,
        Report::OrderDetailsWithCarInfo,
        Report::UsersWithCompletedPurchases,
        Report::EmployeesAndOrdersHandled,
        Report::Top5MostReviewedCars,
        Report::AvailableCarsAndInventory,
        Report::EmployeesAndShippingRecords,
        Report::VisibleReviews,
        Report::ElectricOrHybridCars,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Report::AvailableCarsWithCategory => "available-cars-with-category",
            Report::UsersAndPurchases => "users-and-purchases",
            Report::OrderDetailsWithCarInfo => "order-details-with-car-info",
            Report::UsersWithCompletedPurchases => "users-with-completed-purchases",
            Report::EmployeesAndOrdersHandled => "employees-and-orders-handled",
            Report::Top5MostReviewedCars => "top-5-most-reviewed-cars",
            Report::AvailableCarsAndInventory => "available-cars-and-inventory",
            Report::EmployeesAndShippingRecords => "employees-and-shipping-records",
            Report::VisibleReviews => "visible-reviews",
            Report::ElectricOrHybridCars => "electric-or-hybrid-cars",
        }
    }

    fn sql(self) -> &'static str {
        match self {
            Report::AvailableCarsWithCategory => AVAILABLE_CARS_WITH_CATEGORY,
            Report::UsersAndPurchases => USERS_AND_PURCHASES,
            Report::OrderDetailsWithCarInfo => ORDER_DETAILS_WITH_CAR_INFO,
            Report::UsersWithCompletedPurchases => USERS_WITH_COMPLETED_PURCHASES,
            Report::EmployeesAndOrdersHandled => EMPLOYEES_AND_ORDERS_HANDLED,
            Report::Top5MostReviewedCars => TOP_5_MOST_REVIEWED_CARS,
            Report::AvailableCarsAndInventory => AVAILABLE_CARS_AND_INVENTORY,
            Report::EmployeesAndShippingRecords => EMPLOYEES_AND_SHIPPING_RECORDS,
            Report::VisibleReviews => VISIBLE_REVIEWS,
            Report::ElectricOrHybridCars => ELECTRIC_OR_HYBRID_CARS,
        }
    }
}

/// Which side of a category's price range [`ReportService::compared_to_category`] looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceComparison {
    /// Priced above every car of the category.
    AboveAll,
    /// Priced below at least one car of the category.
    BelowAny,
}

pub struct ReportService;

impl ReportService {
    pub async fn run(pool: &PgPool, report: Report) -> Result<Vec<Value>, AppError> {
        tracing::debug!(report = report.path(), "report");
        let rows = sqlx::query(report.sql()).fetch_all(pool).await?;
        Ok(rows_to_json(&rows))
    }

    pub async fn compared_to_category(
        pool: &PgPool,
        category_id: i32,
        cmp: PriceComparison,
    ) -> Result<Vec<Value>, AppError> {
        let sql = match cmp {
            PriceComparison::AboveAll => CARS_MORE_EXPENSIVE_THAN_CATEGORY,
            PriceComparison::BelowAny => CARS_CHEAPER_THAN_CATEGORY,
        };
        let rows = sqlx::query(sql).bind(category_id).fetch_all(pool).await?;
        Ok(rows_to_json(&rows))
    }

    /// Add an available car with its initial stock. Answers `car_id`, `model_name`, `price`.
    pub async fn add_car(pool: &PgPool, mut payload: NewCar) -> Result<Value, AppError> {
        payload.available = true;
        let car = CarService::create(pool, payload).await?;
        Ok(json!({
            "car_id": car.car_id,
            "model_name": car.model_name,
            "price": car.price,
        }))
    }

    /// Register without the duplicate pre-checks; the unique constraints answer 409.
    pub async fn add_user(pool: &PgPool, payload: NewUser) -> Result<UserIdentity, AppError> {
        let user = UserService::insert_hashed(pool, payload).await?;
        tracing::info!(user_id = user.user_id, "user added");
        Ok(UserIdentity {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
        })
    }

    pub async fn reprice_car(pool: &PgPool, car_id: i32, pricing: CarPricing) -> Result<Value, AppError> {
        let row = sqlx::query(REPRICE_CAR)
            .bind(pricing.price)
            .bind(pricing.available)
            .bind(car_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found("Car"))?;
        tracing::info!(car_id, price = %pricing.price, available = pricing.available, "car repriced");
        Ok(row_to_json(&row))
    }

    pub async fn remove_user_by_email(pool: &PgPool, email: &str) -> Result<UserIdentity, AppError> {
        UserService::delete_by_email(pool, email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_paths_are_distinct() {
        let mut paths: Vec<&str> = Report::ALL.iter().map(|r| r.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), Report::ALL.len());
        assert!(!paths.contains(&"cars") && !paths.contains(&"users"));
    }

    #[test]
    fn active_staff_only() {
        assert!(Report::EmployeesAndOrdersHandled.sql().contains("e.status = 'active'"));
        assert!(Report::EmployeesAndShippingRecords.sql().contains("RIGHT OUTER JOIN employees"));
    }
}
