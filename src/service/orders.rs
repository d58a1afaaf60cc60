//! Order lookups by purchase and order items by order.

use super::CrudService;
use crate::error::AppError;
use crate::models::{Order, OrderItem, OrderWithItems};
use sqlx::PgPool;

pub struct OrderService;

impl OrderService {
    pub async fn by_purchase(pool: &PgPool, purchase_id: i32) -> Result<Vec<Order>, AppError> {
        let rows = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE purchase_id = $1 ORDER BY order_id")
            .bind(purchase_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn items(pool: &PgPool, order_id: i32) -> Result<Vec<OrderItem>, AppError> {
        let rows =
            sqlx::query_as::<_, OrderItem>("SELECT * FROM order_item WHERE order_id = $1 ORDER BY order_item_id")
                .bind(order_id)
                .fetch_all(pool)
                .await?;
        Ok(rows)
    }

    pub async fn with_items(pool: &PgPool, order_id: i32) -> Result<OrderWithItems, AppError> {
        let order: Order = CrudService::get(pool, order_id).await?;
        let order_items = Self::items(pool, order_id).await?;
        Ok(OrderWithItems { order, order_items })
    }
}
