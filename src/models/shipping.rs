use super::{Entity, IntoChangeset};
use crate::sql::Changeset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Delivery tracking for an order, handled by one employee.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Shipping {
    pub shipping_id: i32,
    pub order_id: i32,
    pub emp_id: i32,
    pub shipped_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub shipping_address: Option<String>,
    pub tracking_number: Option<String>,
    pub shipping_provider: Option<String>,
    pub status: Option<String>,
}

impl Entity for Shipping {
    const TABLE: &'static str = "shippings";
    const PK: &'static str = "shipping_id";
    const NAME: &'static str = "Shipping";
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewShipping {
    pub order_id: i32,
    pub emp_id: i32,
    pub shipped_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub shipping_address: Option<String>,
    pub tracking_number: Option<String>,
    pub shipping_provider: Option<String>,
    pub status: Option<String>,
}

impl IntoChangeset for NewShipping {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set("order_id", self.order_id)
            .set("emp_id", self.emp_id)
            .set("shipped_date", self.shipped_date)
            .set("delivery_date", self.delivery_date)
            .set("shipping_address", self.shipping_address)
            .set("tracking_number", self.tracking_number)
            .set("shipping_provider", self.shipping_provider)
            .set("status", self.status)
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ShippingUpdate {
    pub emp_id: Option<i32>,
    pub shipped_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub shipping_address: Option<String>,
    pub tracking_number: Option<String>,
    pub shipping_provider: Option<String>,
    pub status: Option<String>,
}

impl IntoChangeset for ShippingUpdate {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set_some("emp_id", self.emp_id)
            .set_some("shipped_date", self.shipped_date)
            .set_some("delivery_date", self.delivery_date)
            .set_some("shipping_address", self.shipping_address)
            .set_some("tracking_number", self.tracking_number)
            .set_some("shipping_provider", self.shipping_provider)
            .set_some("status", self.status)
    }
}
