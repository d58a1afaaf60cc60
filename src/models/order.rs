use super::{Entity, IntoChangeset, OrderItem};
use crate::sql::Changeset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const ORDER_PROCESSING: &str = "processing";

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub order_id: i32,
    pub purchase_id: i32,
    pub status: Option<String>,
    pub shipping_address: Option<String>,
    pub tracking_number: Option<String>,
    pub expected_delivery: Option<NaiveDate>,
    pub order_date: NaiveDate,
}

impl Entity for Order {
    const TABLE: &'static str = "orders";
    const PK: &'static str = "order_id";
    const NAME: &'static str = "Order";
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewOrder {
    pub purchase_id: i32,
    pub status: Option<String>,
    pub shipping_address: Option<String>,
    pub tracking_number: Option<String>,
    pub expected_delivery: Option<NaiveDate>,
}

impl IntoChangeset for NewOrder {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set("purchase_id", self.purchase_id)
            .set("status", self.status)
            .set("shipping_address", self.shipping_address)
            .set("tracking_number", self.tracking_number)
            .set("expected_delivery", self.expected_delivery)
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct OrderUpdate {
    pub status: Option<String>,
    pub shipping_address: Option<String>,
    pub tracking_number: Option<String>,
    pub expected_delivery: Option<NaiveDate>,
}

impl IntoChangeset for OrderUpdate {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set_some("status", self.status)
            .set_some("shipping_address", self.shipping_address)
            .set_some("tracking_number", self.tracking_number)
            .set_some("expected_delivery", self.expected_delivery)
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub order_items: Vec<OrderItem>,
}
