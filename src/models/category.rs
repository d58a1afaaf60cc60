use super::{Entity, IntoChangeset};
use crate::sql::Changeset;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl Entity for Category {
    const TABLE: &'static str = "categories";
    const PK: &'static str = "category_id";
    const NAME: &'static str = "Category";
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl IntoChangeset for NewCategory {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set("name", self.name)
            .set("description", self.description)
    }
}

impl IntoChangeset for CategoryUpdate {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set_some("name", self.name)
            .set_some("description", self.description)
    }
}
