use super::{Entity, IntoChangeset};
use crate::sql::Changeset;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Append-only receipt record for stock that arrived.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CarInventoryLog {
    pub log_id: i32,
    pub inventory_id: i32,
    pub car_id: i32,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub condition: Option<String>,
    pub warehouse_location: Option<String>,
    pub received_date: Option<NaiveDate>,
}

impl Entity for CarInventoryLog {
    const TABLE: &'static str = "car_inventory_log";
    const PK: &'static str = "log_id";
    const NAME: &'static str = "Car inventory log";
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewCarInventoryLog {
    pub inventory_id: i32,
    pub car_id: i32,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub condition: Option<String>,
    pub warehouse_location: Option<String>,
    pub received_date: Option<NaiveDate>,
}

impl IntoChangeset for NewCarInventoryLog {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set("inventory_id", self.inventory_id)
            .set("car_id", self.car_id)
            .set("quantity", self.quantity)
            .set("unit_price", self.unit_price)
            .set("total_value", self.total_value)
            .set("condition", self.condition)
            .set("warehouse_location", self.warehouse_location)
            .set("received_date", self.received_date)
    }
}
