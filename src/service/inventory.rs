//! Stock lookups and adjustments keyed by car.

use super::{CrudService, RequestValidator};
use crate::error::AppError;
use crate::models::{CarInventory, CarInventoryUpdate, NewCarInventory, Page};
use sqlx::{PgExecutor, PgPool};

pub struct InventoryService;

impl InventoryService {
    pub async fn for_car(pool: &PgPool, car_id: i32, page: Page) -> Result<Vec<CarInventory>, AppError> {
        let rows = sqlx::query_as::<_, CarInventory>(
            "SELECT * FROM car_inventory WHERE car_id = $1 ORDER BY inventory_id LIMIT $2 OFFSET $3",
        )
        .bind(car_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// First inventory row of a car, optionally locked for the rest of the transaction.
    async fn primary_row<'c, X>(exec: X, car_id: i32, lock: bool) -> Result<Option<CarInventory>, AppError>
    where
        X: PgExecutor<'c>,
    {
        let sql = if lock {
            "SELECT * FROM car_inventory WHERE car_id = $1 ORDER BY inventory_id LIMIT 1 FOR UPDATE"
        } else {
            "SELECT * FROM car_inventory WHERE car_id = $1 ORDER BY inventory_id LIMIT 1"
        };
        let row = sqlx::query_as::<_, CarInventory>(sql).bind(car_id).fetch_optional(exec).await?;
        Ok(row)
    }

    /// Partial update of the car's inventory row. 404 when the car has none.
    pub async fn update_for_car(
        pool: &PgPool,
        car_id: i32,
        payload: CarInventoryUpdate,
    ) -> Result<CarInventory, AppError> {
        if let Some(q) = payload.quantity {
            RequestValidator::non_negative("quantity", q)?;
        }
        let row = Self::primary_row(pool, car_id, false)
            .await?
            .ok_or_else(|| AppError::not_found("Car inventory"))?;
        let updated: CarInventory = CrudService::update(pool, row.inventory_id, payload).await?;
        tracing::info!(car_id, inventory_id = updated.inventory_id, quantity = updated.quantity, "inventory updated");
        Ok(updated)
    }

    /// Set the absolute stock of a car, creating its inventory row when missing.
    pub async fn set_stock(pool: &PgPool, car_id: i32, quantity: i32) -> Result<CarInventory, AppError> {
        RequestValidator::non_negative("quantity", quantity)?;
        let mut tx = pool.begin().await?;
        let row: CarInventory = match Self::primary_row(&mut *tx, car_id, true).await? {
            Some(existing) => {
                CrudService::update(
                    &mut *tx,
                    existing.inventory_id,
                    CarInventoryUpdate {
                        quantity: Some(quantity),
                        notes: None,
                    },
                )
                .await?
            }
            None => {
                CrudService::create(
                    &mut *tx,
                    NewCarInventory {
                        car_id,
                        location: None,
                        quantity,
                        notes: None,
                    },
                )
                .await?
            }
        };
        tx.commit().await?;
        tracing::info!(car_id, quantity, "stock set");
        Ok(row)
    }
}
