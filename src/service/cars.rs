//! Car catalog operations that span more than the cars table.

use super::CrudService;
use crate::error::AppError;
use crate::models::{
    Car, CarDetails, CarInventory, CarInventoryLog, CarOverview, CarWithRating, CarWithStock, Category, NewCar,
    NewCarInventory, Review,
};
use sqlx::PgPool;

/// Stock given to a car when it is added to the catalog.
pub const INITIAL_STOCK: i32 = 10;

/// Size of the storefront showcase lists.
pub const SHOWCASE_LIMIT: i64 = 6;

const WITH_STOCK: &str = "SELECT c.*, \
     COALESCE((SELECT SUM(ci.quantity) FROM car_inventory ci WHERE ci.car_id = c.car_id), 0)::int4 AS quantity \
     FROM cars c";

pub struct CarService;

impl CarService {
    /// Insert the car and its inventory row in one transaction.
    pub async fn create(pool: &PgPool, payload: NewCar) -> Result<Car, AppError> {
        let mut tx = pool.begin().await?;
        let car: Car = CrudService::create(&mut *tx, payload).await?;
        let _: CarInventory = CrudService::create(
            &mut *tx,
            NewCarInventory {
                car_id: car.car_id,
                location: None,
                quantity: INITIAL_STOCK,
                notes: None,
            },
        )
        .await?;
        tx.commit().await?;
        tracing::info!(car_id = car.car_id, modelnum = %car.modelnum, "car created");
        Ok(car)
    }

    /// Remove the car with its inventory rows and their logs. Nothing is removed when the car is missing.
    pub async fn delete(pool: &PgPool, car_id: i32) -> Result<Car, AppError> {
        let mut tx = pool.begin().await?;
        sqlx::query(
            "DELETE FROM car_inventory_log WHERE car_id = $1 \
             OR inventory_id IN (SELECT inventory_id FROM car_inventory WHERE car_id = $1)",
        )
        .bind(car_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM car_inventory WHERE car_id = $1")
            .bind(car_id)
            .execute(&mut *tx)
            .await?;
        let car: Car = CrudService::delete(&mut *tx, car_id).await?;
        tx.commit().await?;
        tracing::info!(car_id, "car deleted");
        Ok(car)
    }

    pub async fn top_rated(pool: &PgPool, limit: i64) -> Result<Vec<CarWithRating>, AppError> {
        let rows = sqlx::query_as::<_, CarWithRating>(
            "SELECT c.*, AVG(r.rating)::float8 AS rating \
             FROM cars c LEFT JOIN reviews r ON r.car_id = c.car_id \
             GROUP BY c.car_id \
             ORDER BY AVG(r.rating) DESC NULLS LAST, c.car_id \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn new_arrivals(pool: &PgPool, limit: i64) -> Result<Vec<Car>, AppError> {
        let rows = sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY added_date DESC, car_id DESC LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Cheapest priced cars first; cars without a price are left out.
    pub async fn budget_friendly(pool: &PgPool, limit: i64) -> Result<Vec<Car>, AppError> {
        let rows = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE price IS NOT NULL ORDER BY price ASC, car_id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_category(pool: &PgPool, category_id: i32) -> Result<Vec<Car>, AppError> {
        let _: Category = CrudService::get(pool, category_id).await?;
        let rows = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE category_id = $1 ORDER BY car_id")
            .bind(category_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn details(pool: &PgPool, car_id: i32) -> Result<CarDetails, AppError> {
        let car: Car = CrudService::get(pool, car_id).await?;
        let quantity: Option<i32> =
            sqlx::query_scalar("SELECT quantity FROM car_inventory WHERE car_id = $1 ORDER BY inventory_id LIMIT 1")
                .bind(car_id)
                .fetch_optional(pool)
                .await?;
        let rating: Option<f64> = sqlx::query_scalar("SELECT AVG(rating)::float8 FROM reviews WHERE car_id = $1")
            .bind(car_id)
            .fetch_one(pool)
            .await?;
        let description = car.description();
        Ok(CarDetails {
            car,
            quantity,
            rating,
            description,
        })
    }

    pub async fn overview(pool: &PgPool, car_id: i32) -> Result<CarOverview, AppError> {
        let car: Car = CrudService::get(pool, car_id).await?;
        let inventory = sqlx::query_as::<_, CarInventory>(
            "SELECT * FROM car_inventory WHERE car_id = $1 ORDER BY inventory_id LIMIT 1",
        )
        .bind(car_id)
        .fetch_optional(pool)
        .await?;
        let inventory_logs = sqlx::query_as::<_, CarInventoryLog>(
            "SELECT * FROM car_inventory_log WHERE car_id = $1 ORDER BY log_id",
        )
        .bind(car_id)
        .fetch_all(pool)
        .await?;
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE car_id = $1 AND is_visible ORDER BY created_at DESC, review_id DESC",
        )
        .bind(car_id)
        .fetch_all(pool)
        .await?;
        Ok(CarOverview {
            car,
            inventory,
            inventory_logs,
            reviews,
        })
    }

    /// Every car with its total stock, for the admin listing.
    pub async fn list_with_stock(pool: &PgPool) -> Result<Vec<CarWithStock>, AppError> {
        let sql = format!("{} ORDER BY c.car_id", WITH_STOCK);
        let rows = sqlx::query_as::<_, CarWithStock>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn get_with_stock(pool: &PgPool, car_id: i32) -> Result<CarWithStock, AppError> {
        let sql = format!("{} WHERE c.car_id = $1", WITH_STOCK);
        sqlx::query_as::<_, CarWithStock>(&sql)
            .bind(car_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found("Car"))
    }
}
