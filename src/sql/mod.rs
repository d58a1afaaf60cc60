pub mod builder;
pub mod json;
pub mod params;

pub use builder::{delete_by_id, insert, select_by_id, select_page, update, Changeset};
pub use json::{row_to_json, rows_to_json};
pub use params::SqlValue;
