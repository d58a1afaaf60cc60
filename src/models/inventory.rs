use super::{Entity, IntoChangeset};
use crate::sql::Changeset;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Stock on hand for a car at one location.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CarInventory {
    pub inventory_id: i32,
    pub car_id: i32,
    pub location: Option<String>,
    pub quantity: i32,
    pub notes: Option<String>,
}

impl Entity for CarInventory {
    const TABLE: &'static str = "car_inventory";
    const PK: &'static str = "inventory_id";
    const NAME: &'static str = "Car inventory";
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewCarInventory {
    pub car_id: i32,
    pub location: Option<String>,
    pub quantity: i32,
    pub notes: Option<String>,
}

impl IntoChangeset for NewCarInventory {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set("car_id", self.car_id)
            .set("location", self.location)
            .set("quantity", self.quantity)
            .set("notes", self.notes)
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CarInventoryUpdate {
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

impl IntoChangeset for CarInventoryUpdate {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set_some("quantity", self.quantity)
            .set_some("notes", self.notes)
    }
}

/// Absolute stock level set from the admin surface.
#[derive(Clone, Copy, Debug, Deserialize, ToSchema)]
pub struct StockUpdate {
    pub quantity: i32,
}
