//! CrudService for single-table work, plus domain services for the operations that span tables.

mod cars;
mod crud;
mod inventory;
mod orders;
mod purchases;
mod reports;
mod reviews;
mod users;
mod validation;

pub use cars::{CarService, INITIAL_STOCK, SHOWCASE_LIMIT};
pub use crud::CrudService;
pub use inventory::InventoryService;
pub use orders::OrderService;
pub use purchases::{PurchaseService, DELIVERY_DAYS};
pub use reports::{PriceComparison, Report, ReportService};
pub use reviews::ReviewService;
pub use users::UserService;
pub use validation::RequestValidator;
