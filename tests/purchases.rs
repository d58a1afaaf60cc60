//! Payments and checkout.

#[macro_use]
mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn payments_reduce_the_balance_then_settle() {
    let app = app_or_skip!();
    let user = app.user("payer", "pw").await;
    let purchase = app.purchase(user, 100.0, "pending").await;
    let uri = format!("/purchases/{}", purchase);

    let (status, body) = app.patch(&uri, json!({ "amount_paid": 40 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"].as_f64(), Some(60.0));
    assert_eq!(body["status"], "pending");

    let (status, body) = app.patch(&uri, json!({ "amount_paid": 75.5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paid");
    assert_eq!(body["amount"].as_f64(), Some(60.0));

    let (status, body) = app.patch(&uri, json!({ "amount_paid": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "This purchase has already been paid.");
    app.cleanup().await;
}

#[tokio::test]
async fn invalid_payments_are_rejected() {
    let app = app_or_skip!();
    let (status, body) = app.patch("/purchases/999999", json!({ "amount_paid": 10 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Purchase not found");

    let user = app.user("zero", "pw").await;
    let purchase = app.purchase(user, 50.0, "pending").await;
    let (status, _) = app
        .patch(&format!("/purchases/{}", purchase), json!({ "amount_paid": 0 }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (_, body) = app.get(&format!("/purchases/{}", purchase)).await;
    assert_eq!(body["amount"].as_f64(), Some(50.0));
    app.cleanup().await;
}

#[tokio::test]
async fn sub_cent_payments_are_rejected() {
    let app = app_or_skip!();
    let user = app.user("penny", "pw").await;
    let purchase = app.purchase(user, 100.0, "pending").await;
    let uri = format!("/purchases/{}", purchase);

    let (status, body) = app.patch(&uri, json!({ "amount_paid": 0.004 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "validation_error");
    let (_, body) = app.get(&uri).await;
    assert_eq!(body["amount"].as_f64(), Some(100.0));

    let (status, body) = app.patch(&uri, json!({ "amount_paid": 0.25 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"].as_f64(), Some(99.75));
    app.cleanup().await;
}

#[tokio::test]
async fn concurrent_partial_payments_are_not_lost() {
    let app = app_or_skip!();
    let user = app.user("racer", "pw").await;
    let purchase = app.purchase(user, 100.0, "pending").await;
    let uri = format!("/purchases/{}", purchase);

    let (a, b) = tokio::join!(
        app.patch(&uri, json!({ "amount_paid": 10 })),
        app.patch(&uri, json!({ "amount_paid": 15 }))
    );
    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);
    let (_, body) = app.get(&uri).await;
    assert_eq!(body["amount"].as_f64(), Some(75.0));
    app.cleanup().await;
}

#[tokio::test]
async fn checkout_creates_purchase_order_and_items() {
    let app = app_or_skip!();
    let user = app.user("shopper", "pw").await;
    let cat = app.category("Sedan").await;
    let car = app.car(cat, json!({ "price": 20000 })).await;

    let (status, receipt) = app
        .post(
            "/purchases/checkout",
            json!({
                "user_id": user,
                "payment_method": "card",
                "shipping_address": "12 Elm St",
                "items": [{ "car_id": car, "quantity": 2 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{receipt}");
    assert_eq!(receipt["purchase"]["amount"].as_f64(), Some(40000.0));
    assert_eq!(receipt["purchase"]["status"], "pending");
    assert!(receipt["purchase"]["invoice_number"].as_str().unwrap().starts_with("INV-"));
    assert_eq!(receipt["order"]["status"], "processing");
    assert_eq!(receipt["order"]["shipping_address"], "12 Elm St");
    assert!(receipt["order"]["expected_delivery"].is_string());
    assert_eq!(receipt["items"][0]["price_at_order"].as_f64(), Some(20000.0));

    let (_, stock) = app.get(&format!("/cars/{}/details", car)).await;
    assert_eq!(stock["quantity"], 8);

    let purchase_id = receipt["purchase"]["purchase_id"].as_i64().unwrap();
    let (_, orders) = app.get(&format!("/orders/purchase/{}", purchase_id)).await;
    let order_id = orders[0]["order_id"].as_i64().unwrap();
    let (_, items) = app.get(&format!("/order_items/by_order/{}", order_id)).await;
    assert_eq!(items[0]["car_id"], car);

    let (status, admin_order) = app.get(&format!("/admin/orders/{}", order_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin_order["order_items"][0]["quantity"], 2);
    let (_, admin_purchase) = app.get(&format!("/admin/purchases/{}", purchase_id)).await;
    assert_eq!(admin_purchase["orders"][0]["order_id"], order_id);
    assert_eq!(admin_purchase["user"]["username"], "shopper");

    let (_, owned) = app.get(&format!("/users/{}/purchase-for-car/{}", user, car)).await;
    assert!(owned["purchase_id"].is_null());
    app.patch(&format!("/purchases/{}", purchase_id), json!({ "amount_paid": 40000 }))
        .await;
    let (_, owned) = app.get(&format!("/users/{}/purchase-for-car/{}", user, car)).await;
    assert_eq!(owned["purchase_id"], purchase_id);
    app.cleanup().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn overlapping_checkouts_in_opposite_order_both_succeed() {
    let app = app_or_skip!();
    let user = app.user("pair", "pw").await;
    let cat = app.category("Wagon").await;
    let a = app.car(cat, json!({ "price": 1000 })).await;
    let b = app.car(cat, json!({ "price": 2000 })).await;
    let cart = |first: i64, second: i64| {
        json!({
            "user_id": user,
            "items": [{ "car_id": first, "quantity": 1 }, { "car_id": second, "quantity": 1 }]
        })
    };

    for _ in 0..5 {
        let (left, right) = tokio::join!(
            app.post("/purchases/checkout", cart(a, b)),
            app.post("/purchases/checkout", cart(b, a))
        );
        assert_eq!(left.0, StatusCode::CREATED, "{}", left.1);
        assert_eq!(right.0, StatusCode::CREATED, "{}", right.1);
    }

    for car in [a, b] {
        let (_, details) = app.get(&format!("/cars/{}/details", car)).await;
        assert_eq!(details["quantity"], 0);
    }
    app.cleanup().await;
}

#[tokio::test]
async fn repeated_cart_lines_are_merged() {
    let app = app_or_skip!();
    let user = app.user("twice", "pw").await;
    let cat = app.category("Kei").await;
    let car = app.car(cat, json!({ "price": 500 })).await;

    let (status, receipt) = app
        .post(
            "/purchases/checkout",
            json!({ "user_id": user, "items": [{ "car_id": car, "quantity": 2 }, { "car_id": car, "quantity": 3 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{receipt}");
    assert_eq!(receipt["items"].as_array().unwrap().len(), 1);
    assert_eq!(receipt["items"][0]["quantity"], 5);
    assert_eq!(receipt["purchase"]["amount"].as_f64(), Some(2500.0));
    let (_, details) = app.get(&format!("/cars/{}/details", car)).await;
    assert_eq!(details["quantity"], 5);
    app.cleanup().await;
}

#[tokio::test]
async fn checkout_without_enough_stock_writes_nothing() {
    let app = app_or_skip!();
    let user = app.user("greedy", "pw").await;
    let cat = app.category("Sport").await;
    let first = app.car(cat, json!({ "price": 1000 })).await;
    let second = app.car(cat, json!({ "price": 2000 })).await;

    let (status, body) = app
        .post(
            "/purchases/checkout",
            json!({
                "user_id": user,
                "items": [{ "car_id": first, "quantity": 1 }, { "car_id": second, "quantity": 11 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");

    let (_, stock) = app.get(&format!("/cars/{}/details", first)).await;
    assert_eq!(stock["quantity"], 10);
    let (_, purchases) = app.get("/purchases").await;
    assert_eq!(purchases, json!([]));

    let (status, _) = app
        .post("/purchases/checkout", json!({ "user_id": user, "items": [{ "car_id": 999999, "quantity": 1 }] }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    app.cleanup().await;
}

#[tokio::test]
async fn reviews_validate_rating_and_list_visible_ones() {
    let app = app_or_skip!();
    let user = app.user("critic", "pw").await;
    let cat = app.category("Compact").await;
    let car = app.car(cat, json!({})).await;
    let purchase = app.purchase(user, 0.0, "paid").await;

    let review = |rating: i64, visible: bool| {
        json!({ "purchase_id": purchase, "car_id": car, "user_id": user, "rating": rating, "is_visible": visible })
    };
    let (status, _) = app.post("/reviews", review(6, true)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = app.post("/reviews", review(4, true)).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.post("/reviews", review(2, false)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, rows) = app.get(&format!("/reviews/cars/{}/reviews", car)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["username"], "critic");
    assert_eq!(rows[0]["rating"], 4);

    let (_, top) = app.get("/cars/top-rated").await;
    assert_eq!(top[0]["car_id"], car);
    assert_eq!(top[0]["rating"].as_f64(), Some(3.0));
    app.cleanup().await;
}
