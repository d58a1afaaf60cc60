//! HTTP handlers. Generic CRUD lives in `crud`; the rest are per resource group.

pub mod admin;
pub mod cars;
pub mod crud;
pub mod inventory;
pub mod orders;
pub mod purchases;
pub mod queries;
pub mod reviews;
pub mod users;
