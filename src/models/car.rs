use super::{default_true, CarInventory, CarInventoryLog, Entity, IntoChangeset, Review};
use crate::sql::Changeset;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Car {
    pub car_id: i32,
    pub category_id: i32,
    pub modelnum: String,
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    pub year: Option<i32>,
    pub engine_type: Option<String>,
    pub transmission: Option<String>,
    pub color: Option<String>,
    pub mileage: Option<i32>,
    pub fuel_capacity: Option<Decimal>,
    pub seating_capacity: Option<i32>,
    pub price: Option<Decimal>,
    pub available: bool,
    pub added_date: NaiveDate,
    pub image_link: Option<String>,
}

impl Entity for Car {
    const TABLE: &'static str = "cars";
    const PK: &'static str = "car_id";
    const NAME: &'static str = "Car";
}

impl Car {
    /// One-line summary of the attributes that are set, e.g.
    /// `"Manufacturer: Toyota, Model: Corolla, Year: 2020"`.
    pub fn description(&self) -> String {
        let mut parts = Vec::new();
        if let Some(v) = self.manufacturer.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("Manufacturer: {}", v));
        }
        if let Some(v) = self.model_name.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("Model: {}", v));
        }
        if let Some(v) = self.year.filter(|y| *y != 0) {
            parts.push(format!("Year: {}", v));
        }
        if let Some(v) = self.engine_type.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("Engine: {}", v));
        }
        if let Some(v) = self.transmission.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("Transmission: {}", v));
        }
        if let Some(v) = self.color.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("Color: {}", v));
        }
        if let Some(v) = self.mileage {
            parts.push(format!("Mileage: {} km", v));
        }
        if let Some(v) = self.fuel_capacity {
            parts.push(format!("Fuel Capacity: {} L", v));
        }
        if let Some(v) = self.seating_capacity {
            parts.push(format!("Seating Capacity: {}", v));
        }
        if let Some(v) = self.price {
            parts.push(format!("Price: ${}", v));
        }
        if parts.is_empty() {
            "No description available.".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewCar {
    pub category_id: i32,
    pub modelnum: String,
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    pub year: Option<i32>,
    pub engine_type: Option<String>,
    pub transmission: Option<String>,
    pub color: Option<String>,
    pub mileage: Option<i32>,
    pub fuel_capacity: Option<Decimal>,
    pub seating_capacity: Option<i32>,
    pub price: Option<Decimal>,
    #[serde(default = "default_true")]
    pub available: bool,
    pub image_link: Option<String>,
}

impl IntoChangeset for NewCar {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set("category_id", self.category_id)
            .set("modelnum", self.modelnum)
            .set("manufacturer", self.manufacturer)
            .set("model_name", self.model_name)
            .set("year", self.year)
            .set("engine_type", self.engine_type)
            .set("transmission", self.transmission)
            .set("color", self.color)
            .set("mileage", self.mileage)
            .set("fuel_capacity", self.fuel_capacity)
            .set("seating_capacity", self.seating_capacity)
            .set("price", self.price)
            .set("available", self.available)
            .set("image_link", self.image_link)
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CarUpdate {
    pub category_id: Option<i32>,
    pub modelnum: Option<String>,
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    pub year: Option<i32>,
    pub engine_type: Option<String>,
    pub transmission: Option<String>,
    pub color: Option<String>,
    pub mileage: Option<i32>,
    pub fuel_capacity: Option<Decimal>,
    pub seating_capacity: Option<i32>,
    pub price: Option<Decimal>,
    pub available: Option<bool>,
    pub image_link: Option<String>,
}

impl IntoChangeset for CarUpdate {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set_some("category_id", self.category_id)
            .set_some("modelnum", self.modelnum)
            .set_some("manufacturer", self.manufacturer)
            .set_some("model_name", self.model_name)
            .set_some("year", self.year)
            .set_some("engine_type", self.engine_type)
            .set_some("transmission", self.transmission)
            .set_some("color", self.color)
            .set_some("mileage", self.mileage)
            .set_some("fuel_capacity", self.fuel_capacity)
            .set_some("seating_capacity", self.seating_capacity)
            .set_some("price", self.price)
            .set_some("available", self.available)
            .set_some("image_link", self.image_link)
    }
}

/// Price and availability set together by the quick repricing query; refreshes `added_date`.
#[derive(Clone, Copy, Debug, Deserialize, ToSchema)]
pub struct CarPricing {
    pub price: Decimal,
    pub available: bool,
}

/// Car row with its average review rating (null when unreviewed).
#[derive(Clone, Debug, Serialize, FromRow, ToSchema)]
pub struct CarWithRating {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub car: Car,
    pub rating: Option<f64>,
}

/// Car row with on-hand quantity (null without inventory), rating and generated description.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct CarDetails {
    #[serde(flatten)]
    pub car: Car,
    pub quantity: Option<i32>,
    pub rating: Option<f64>,
    pub description: String,
}

/// Car row with stock for admin listings; quantity is 0 when the car has no inventory row.
#[derive(Clone, Debug, Serialize, FromRow, ToSchema)]
pub struct CarWithStock {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub car: Car,
    pub quantity: i32,
}

/// Everything the storefront shows on a car page.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct CarOverview {
    pub car: Car,
    pub inventory: Option<CarInventory>,
    pub inventory_logs: Vec<CarInventoryLog>,
    pub reviews: Vec<Review>,
}
