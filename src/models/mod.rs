//! Row types, request payloads and response shapes, one module per table.

pub mod car;
pub mod category;
pub mod employee;
pub mod inventory;
pub mod inventory_log;
pub mod order;
pub mod order_item;
pub mod purchase;
pub mod review;
pub mod shipping;
pub mod user;

pub use car::*;
pub use category::*;
pub use employee::*;
pub use inventory::*;
pub use inventory_log::*;
pub use order::*;
pub use order_item::*;
pub use purchase::*;
pub use review::*;
pub use shipping::*;
pub use user::*;

use crate::sql::Changeset;
use serde::Deserialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// A table addressed by a single integer primary key.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    const PK: &'static str;
    /// Human name used in `"<NAME> not found"`.
    const NAME: &'static str;
}

/// Payloads that turn into column assignments. Update payloads only assign the fields they carry.
pub trait IntoChangeset {
    fn into_changeset(self) -> Changeset;
}

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

/// `?skip=&limit=` on list endpoints. limit defaults to 100 and is capped at 1000.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Page {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl Page {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(0, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_caps() {
        let page = Page::default();
        assert_eq!((page.offset(), page.limit()), (0, 100));
        let page = Page { skip: Some(-5), limit: Some(50_000) };
        assert_eq!((page.offset(), page.limit()), (0, 1000));
        let page = Page { skip: Some(20), limit: Some(10) };
        assert_eq!((page.offset(), page.limit()), (20, 10));
    }
}
