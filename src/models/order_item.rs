use super::{Entity, IntoChangeset};
use crate::sql::Changeset;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Line item: a car in an order with the price it was sold at.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: i32,
    pub car_id: i32,
    pub quantity: i32,
    pub price_at_order: Option<Decimal>,
}

impl Entity for OrderItem {
    const TABLE: &'static str = "order_item";
    const PK: &'static str = "order_item_id";
    const NAME: &'static str = "Order item";
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub car_id: i32,
    pub quantity: i32,
    pub price_at_order: Option<Decimal>,
}

impl IntoChangeset for NewOrderItem {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set("order_id", self.order_id)
            .set("car_id", self.car_id)
            .set("quantity", self.quantity)
            .set("price_at_order", self.price_at_order)
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct OrderItemUpdate {
    pub quantity: Option<i32>,
    pub price_at_order: Option<Decimal>,
}

impl IntoChangeset for OrderItemUpdate {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set_some("quantity", self.quantity)
            .set_some("price_at_order", self.price_at_order)
    }
}
