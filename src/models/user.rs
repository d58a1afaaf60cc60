use super::{Entity, IntoChangeset, Purchase, Review};
use crate::sql::Changeset;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Public view of a user row. The password hash column is never read into it.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub user_id: i32,
    pub email: String,
    pub username: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<NaiveDate>,
    pub card_num: Option<String>,
    pub bank_acc: Option<String>,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const PK: &'static str = "user_id";
    const NAME: &'static str = "User";
}

/// Registration payload. `password` is plaintext here and hashed before insert.
#[derive(Clone, Deserialize, ToSchema)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<NaiveDate>,
    pub card_num: Option<String>,
    pub bank_acc: Option<String>,
}

impl NewUser {
    /// Column assignments with the password replaced by its hash.
    pub fn into_changeset_with_hash(self, password_hash: String) -> Changeset {
        Changeset::new()
            .set("email", self.email)
            .set("username", self.username)
            .set("password", password_hash)
            .set("address", self.address)
            .set("phone", self.phone)
            .set("dob", self.dob)
            .set("card_num", self.card_num)
            .set("bank_acc", self.bank_acc)
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<NaiveDate>,
    pub card_num: Option<String>,
    pub bank_acc: Option<String>,
}

impl IntoChangeset for UserUpdate {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set_some("email", self.email)
            .set_some("username", self.username)
            .set_some("address", self.address)
            .set_some("phone", self.phone)
            .set_some("dob", self.dob)
            .set_some("card_num", self.card_num)
            .set_some("bank_acc", self.bank_acc)
    }
}

#[derive(Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: i32,
    pub username: String,
}

#[derive(Clone, Debug, Serialize, FromRow, ToSchema)]
pub struct ReviewSummary {
    pub review_id: i32,
    pub car_id: i32,
    pub rating: i32,
    pub review_text: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, FromRow, ToSchema)]
pub struct PurchaseSummary {
    pub purchase_id: i32,
    pub amount: Decimal,
    pub status: Option<String>,
    pub invoice_number: Option<String>,
}

/// Profile page: the user plus what they reviewed and bought.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct UserActivity {
    #[serde(flatten)]
    pub user: User,
    pub reviews: Vec<ReviewSummary>,
    pub purchases: Vec<PurchaseSummary>,
}

/// Admin detail view with full related rows.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: User,
    pub purchases: Vec<Purchase>,
    pub reviews: Vec<Review>,
}

#[derive(Clone, Copy, Debug, Serialize, ToSchema)]
pub struct PurchaseForCar {
    pub purchase_id: Option<i32>,
}

/// Short confirmation returned by the raw registration and delete-by-email queries.
#[derive(Clone, Debug, Serialize, FromRow, ToSchema)]
pub struct UserIdentity {
    pub user_id: i32,
    pub username: String,
    pub email: String,
}
