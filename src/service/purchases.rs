//! Payments, checkout and purchase views.

use super::{CrudService, RequestValidator};
use crate::error::AppError;
use crate::models::{
    apply_payment, CheckoutReceipt, CheckoutRequest, NewOrder, NewOrderItem, NewPurchase, Order, OrderItem,
    PaymentOutcome, PaymentUpdate, Purchase, PurchaseDetails, User, ORDER_PROCESSING, STATUS_PAID, STATUS_PENDING,
};
use crate::sql::{update, Changeset};
use chrono::{Days, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Days from checkout to the promised delivery date.
pub const DELIVERY_DAYS: u64 = 7;

pub struct PurchaseService;

impl PurchaseService {
    /// Apply a payment. The purchase row is locked until commit so concurrent payments serialize.
    pub async fn pay(pool: &PgPool, purchase_id: i32, payment: PaymentUpdate) -> Result<Purchase, AppError> {
        let mut tx = pool.begin().await?;
        let current = sqlx::query_as::<_, Purchase>("SELECT * FROM purchase WHERE purchase_id = $1 FOR UPDATE")
            .bind(purchase_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Purchase"))?;
        RequestValidator::cents("amount_paid", payment.amount_paid)?;

        let changes = match apply_payment(current.status.as_deref(), current.amount, payment.amount_paid)? {
            PaymentOutcome::Settled => Changeset::new().set("status", STATUS_PAID),
            PaymentOutcome::Partial { remaining } => Changeset::new().set("amount", remaining),
        };
        let Some(mut q) = update("purchase", "purchase_id", purchase_id, changes) else {
            return Ok(current);
        };
        let updated = q.build_query_as::<Purchase>().fetch_one(&mut *tx).await?;
        tx.commit().await?;
        tracing::info!(
            purchase_id,
            paid = %payment.amount_paid,
            remaining = %updated.amount,
            status = updated.status.as_deref().unwrap_or(""),
            "payment applied"
        );
        Ok(updated)
    }

    /// Turn a cart into a purchase, one order and its items, taking stock as it goes.
    /// Any failure rolls the whole checkout back.
    pub async fn checkout(pool: &PgPool, req: CheckoutRequest) -> Result<CheckoutReceipt, AppError> {
        if req.items.is_empty() {
            return Err(AppError::Validation("items must not be empty".into()));
        }
        let mut lines: BTreeMap<i32, i32> = BTreeMap::new();
        for line in &req.items {
            RequestValidator::positive("quantity", line.quantity)?;
            let quantity = lines.entry(line.car_id).or_insert(0);
            *quantity = quantity
                .checked_add(line.quantity)
                .ok_or_else(|| AppError::Validation("quantity is too large".into()))?;
        }

        let mut tx = pool.begin().await?;
        let _: User = CrudService::get(&mut *tx, req.user_id).await?;

        // Stock rows are locked in ascending car_id order so overlapping carts cannot deadlock.
        let mut priced = Vec::with_capacity(lines.len());
        let mut total = Decimal::ZERO;
        for (car_id, quantity) in lines {
            let price: Option<Option<Decimal>> = sqlx::query_scalar("SELECT price FROM cars WHERE car_id = $1")
                .bind(car_id)
                .fetch_optional(&mut *tx)
                .await?;
            let price = price
                .ok_or_else(|| AppError::not_found("Car"))?
                .ok_or_else(|| AppError::Validation(format!("car {} has no price", car_id)))?;

            let stock: Option<(i32, i32)> = sqlx::query_as(
                "SELECT inventory_id, quantity FROM car_inventory WHERE car_id = $1 \
                 ORDER BY inventory_id LIMIT 1 FOR UPDATE",
            )
            .bind(car_id)
            .fetch_optional(&mut *tx)
            .await?;
            let inventory_id = match stock {
                Some((id, on_hand)) if on_hand >= quantity => id,
                _ => return Err(AppError::Conflict(format!("Insufficient stock for car {}", car_id))),
            };
            sqlx::query("UPDATE car_inventory SET quantity = quantity - $1 WHERE inventory_id = $2")
                .bind(quantity)
                .bind(inventory_id)
                .execute(&mut *tx)
                .await?;

            total += price * Decimal::from(quantity);
            priced.push((car_id, quantity, price));
        }

        let invoice_number = req
            .invoice_number
            .unwrap_or_else(|| format!("INV-{}", Uuid::new_v4().simple()));
        let purchase: Purchase = CrudService::create(
            &mut *tx,
            NewPurchase {
                user_id: req.user_id,
                amount: total,
                payment_method: req.payment_method,
                status: Some(STATUS_PENDING.into()),
                invoice_number: Some(invoice_number),
            },
        )
        .await?;

        let expected_delivery = Utc::now().date_naive().checked_add_days(Days::new(DELIVERY_DAYS));
        let order: Order = CrudService::create(
            &mut *tx,
            NewOrder {
                purchase_id: purchase.purchase_id,
                status: Some(ORDER_PROCESSING.into()),
                shipping_address: req.shipping_address,
                tracking_number: None,
                expected_delivery,
            },
        )
        .await?;

        let mut items = Vec::with_capacity(priced.len());
        for (car_id, quantity, price) in priced {
            let item: OrderItem = CrudService::create(
                &mut *tx,
                NewOrderItem {
                    order_id: order.order_id,
                    car_id,
                    quantity,
                    price_at_order: Some(price),
                },
            )
            .await?;
            items.push(item);
        }

        tx.commit().await?;
        tracing::info!(
            purchase_id = purchase.purchase_id,
            order_id = order.order_id,
            items = items.len(),
            amount = %purchase.amount,
            "checkout completed"
        );
        Ok(CheckoutReceipt { purchase, order, items })
    }

    pub async fn details(pool: &PgPool, purchase_id: i32) -> Result<PurchaseDetails, AppError> {
        let purchase: Purchase = CrudService::get(pool, purchase_id).await?;
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE purchase_id = $1 ORDER BY order_id")
            .bind(purchase_id)
            .fetch_all(pool)
            .await?;
        let user: Option<User> = CrudService::read(pool, purchase.user_id).await?;
        Ok(PurchaseDetails { purchase, orders, user })
    }
}
