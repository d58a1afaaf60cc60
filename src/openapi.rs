//! OpenAPI document served at `/openapi.json`.

use crate::models::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Dealership API", description = "Vehicle dealership catalog and order management"),
    components(schemas(
        Category,
        NewCategory,
        CategoryUpdate,
        Car,
        NewCar,
        CarUpdate,
        CarPricing,
        CarWithRating,
        CarDetails,
        CarWithStock,
        CarOverview,
        CarInventory,
        NewCarInventory,
        CarInventoryUpdate,
        StockUpdate,
        CarInventoryLog,
        NewCarInventoryLog,
        User,
        NewUser,
        UserUpdate,
        LoginRequest,
        LoginResponse,
        ReviewSummary,
        PurchaseSummary,
        UserActivity,
        UserDetails,
        PurchaseForCar,
        UserIdentity,
        Employee,
        NewEmployee,
        EmployeeUpdate,
        Purchase,
        NewPurchase,
        PurchaseUpdate,
        PaymentUpdate,
        CheckoutLine,
        CheckoutRequest,
        CheckoutReceipt,
        PurchaseDetails,
        Order,
        NewOrder,
        OrderUpdate,
        OrderWithItems,
        OrderItem,
        NewOrderItem,
        OrderItemUpdate,
        Shipping,
        NewShipping,
        ShippingUpdate,
        Review,
        NewReview,
        ReviewUpdate,
        ReviewWithAuthor
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_row_and_payload_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        for name in ["Car", "NewUser", "PaymentUpdate", "CheckoutRequest", "ReviewWithAuthor"] {
            assert!(schemas.contains_key(name), "missing schema {}", name);
        }
    }
}
