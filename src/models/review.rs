use super::{default_true, Entity, IntoChangeset};
use crate::sql::Changeset;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub review_id: i32,
    pub purchase_id: i32,
    pub car_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub review_text: Option<String>,
    pub created_at: NaiveDateTime,
    pub is_visible: bool,
    pub helpful_count: i32,
    pub employee_feedback: Option<String>,
}

impl Entity for Review {
    const TABLE: &'static str = "reviews";
    const PK: &'static str = "review_id";
    const NAME: &'static str = "Review";
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewReview {
    pub purchase_id: i32,
    pub car_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub review_text: Option<String>,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub helpful_count: i32,
    pub employee_feedback: Option<String>,
}

impl IntoChangeset for NewReview {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set("purchase_id", self.purchase_id)
            .set("car_id", self.car_id)
            .set("user_id", self.user_id)
            .set("rating", self.rating)
            .set("review_text", self.review_text)
            .set("is_visible", self.is_visible)
            .set("helpful_count", self.helpful_count)
            .set("employee_feedback", self.employee_feedback)
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ReviewUpdate {
    pub rating: Option<i32>,
    pub review_text: Option<String>,
    pub is_visible: Option<bool>,
    pub helpful_count: Option<i32>,
    pub employee_feedback: Option<String>,
}

impl IntoChangeset for ReviewUpdate {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set_some("rating", self.rating)
            .set_some("review_text", self.review_text)
            .set_some("is_visible", self.is_visible)
            .set_some("helpful_count", self.helpful_count)
            .set_some("employee_feedback", self.employee_feedback)
    }
}

/// Review as shown on a car page, with the author's username.
#[derive(Clone, Debug, Serialize, FromRow, ToSchema)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub review: Review,
    pub username: Option<String>,
}
