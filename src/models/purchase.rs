use super::{Entity, IntoChangeset, Order, OrderItem};
use crate::error::AppError;
use crate::sql::Changeset;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const STATUS_PAID: &str = "paid";
pub const STATUS_PENDING: &str = "pending";

/// Aggregate payment record for a user. `amount` is the balance still owed until paid.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Purchase {
    pub purchase_id: i32,
    pub user_id: i32,
    pub amount: Decimal,
    pub payment_method: Option<String>,
    pub status: Option<String>,
    pub invoice_number: Option<String>,
    pub purchase_date: NaiveDate,
}

impl Entity for Purchase {
    const TABLE: &'static str = "purchase";
    const PK: &'static str = "purchase_id";
    const NAME: &'static str = "Purchase";
}

impl Purchase {
    pub fn is_paid(&self) -> bool {
        self.status.as_deref() == Some(STATUS_PAID)
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewPurchase {
    pub user_id: i32,
    pub amount: Decimal,
    pub payment_method: Option<String>,
    pub status: Option<String>,
    pub invoice_number: Option<String>,
}

impl IntoChangeset for NewPurchase {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set("user_id", self.user_id)
            .set("amount", self.amount)
            .set("payment_method", self.payment_method)
            .set("status", self.status)
            .set("invoice_number", self.invoice_number)
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct PurchaseUpdate {
    pub payment_method: Option<String>,
    pub status: Option<String>,
    pub invoice_number: Option<String>,
}

impl IntoChangeset for PurchaseUpdate {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set_some("payment_method", self.payment_method)
            .set_some("status", self.status)
            .set_some("invoice_number", self.invoice_number)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, ToSchema)]
pub struct PaymentUpdate {
    pub amount_paid: Decimal,
}

/// Effect of one payment on a purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The payment covered the balance; status becomes `paid`, amount is left as is.
    Settled,
    /// The balance is reduced to `remaining`.
    Partial { remaining: Decimal },
}

/// Apply a payment of `paid` against `balance`. No rounding, no refund of overpayment.
pub fn apply_payment(status: Option<&str>, balance: Decimal, paid: Decimal) -> Result<PaymentOutcome, AppError> {
    if paid <= Decimal::ZERO {
        return Err(AppError::Validation("amount_paid must be greater than zero".into()));
    }
    if status == Some(STATUS_PAID) {
        return Err(AppError::BadRequest("This purchase has already been paid.".into()));
    }
    if paid >= balance {
        Ok(PaymentOutcome::Settled)
    } else {
        Ok(PaymentOutcome::Partial { remaining: balance - paid })
    }
}

#[derive(Clone, Copy, Debug, Deserialize, ToSchema)]
pub struct CheckoutLine {
    pub car_id: i32,
    pub quantity: i32,
}

/// Cart submission: one purchase, one order, one item per line.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub user_id: i32,
    pub payment_method: Option<String>,
    pub shipping_address: Option<String>,
    pub invoice_number: Option<String>,
    pub items: Vec<CheckoutLine>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct CheckoutReceipt {
    pub purchase: Purchase,
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Admin detail view of a purchase.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct PurchaseDetails {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub orders: Vec<Order>,
    pub user: Option<super::User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn full_payment_settles() {
        let out = apply_payment(Some("pending"), dec("150.00"), dec("150.00")).unwrap();
        assert_eq!(out, PaymentOutcome::Settled);
    }

    #[test]
    fn overpayment_settles_without_refund() {
        let out = apply_payment(None, dec("99.99"), dec("120")).unwrap();
        assert_eq!(out, PaymentOutcome::Settled);
    }

    #[test]
    fn partial_payment_reduces_balance_exactly() {
        let out = apply_payment(Some("pending"), dec("1000.10"), dec("0.30")).unwrap();
        assert_eq!(out, PaymentOutcome::Partial { remaining: dec("999.80") });
    }

    #[test]
    fn paid_purchase_rejects_further_payment() {
        let err = apply_payment(Some("paid"), dec("10"), dec("5")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "This purchase has already been paid."));
    }

    #[test]
    fn non_positive_payment_is_invalid() {
        assert!(matches!(
            apply_payment(None, dec("10"), dec("0")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            apply_payment(None, dec("10"), dec("-3")),
            Err(AppError::Validation(_))
        ));
    }
}
