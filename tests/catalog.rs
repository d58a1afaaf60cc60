//! Car catalog and inventory behavior through the HTTP surface.

#[macro_use]
mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn creating_a_car_stocks_ten_units() {
    let app = app_or_skip!();
    let cat = app.category("Sedan").await;
    let car = app
        .car(cat, json!({ "manufacturer": "Toyota", "model_name": "Corolla", "year": 2022, "price": 21000 }))
        .await;

    let (status, rows) = app.get(&format!("/car_inventory/cars/{}/inventory", car)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().expect("array").clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["quantity"], 10);

    let (status, details) = app.get(&format!("/cars/{}/details", car)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["quantity"], 10);
    assert!(details["rating"].is_null());
    assert_eq!(
        details["description"],
        "Manufacturer: Toyota, Model: Corolla, Year: 2022, Price: $21000.00"
    );
    assert_eq!(details["available"], true);
    app.cleanup().await;
}

#[tokio::test]
async fn deleting_a_car_removes_its_inventory() {
    let app = app_or_skip!();
    let (status, body) = app.delete("/cars/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Car not found");

    let cat = app.category("SUV").await;
    let car = app.car(cat, json!({ "model_name": "RAV4" })).await;
    let (status, body) = app.delete(&format!("/cars/{}", car)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["car_id"], car);

    let (status, _) = app.get(&format!("/cars/{}", car)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, rows) = app.get(&format!("/car_inventory/cars/{}/inventory", car)).await;
    assert_eq!(rows, json!([]));
    app.cleanup().await;
}

#[tokio::test]
async fn cars_of_a_missing_category_is_404() {
    let app = app_or_skip!();
    let (status, body) = app.get("/cars/category/424242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Category not found");
    assert_eq!(body["code"], "not_found");

    let cat = app.category("Coupe").await;
    let car = app.car(cat, json!({})).await;
    let (status, rows) = app.get(&format!("/cars/category/{}", cat)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows[0]["car_id"], car);
    app.cleanup().await;
}

#[tokio::test]
async fn budget_friendly_skips_unpriced_cars() {
    let app = app_or_skip!();
    let cat = app.category("Hatchback").await;
    let pricey = app.car(cat, json!({ "price": 30000 })).await;
    let cheap = app.car(cat, json!({ "price": 15000.5 })).await;
    app.car(cat, json!({})).await;

    let (status, rows) = app.get("/cars/budget-friendly").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = rows.as_array().unwrap().iter().map(|r| r["car_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![cheap, pricey]);
    assert_eq!(rows[0]["price"].as_f64(), Some(15000.5));
    app.cleanup().await;
}

#[tokio::test]
async fn partial_updates_keep_other_fields() {
    let app = app_or_skip!();
    let cat = app.category("Van").await;
    let car = app.car(cat, json!({ "color": "red", "price": 18000 })).await;

    let (status, body) = app.put(&format!("/cars/{}", car), json!({ "color": "blue" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["color"], "blue");
    assert_eq!(body["price"].as_f64(), Some(18000.0));

    let (status, body) = app.put(&format!("/cars/{}", car), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["color"], "blue");
    app.cleanup().await;
}

#[tokio::test]
async fn inventory_patch_is_keyed_by_car() {
    let app = app_or_skip!();
    let cat = app.category("Truck").await;
    let car = app.car(cat, json!({})).await;

    let (status, body) = app
        .patch(&format!("/car_inventory/{}", car), json!({ "quantity": 3, "notes": "lot B" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["car_id"], car);
    assert_eq!(body["quantity"], 3);
    assert_eq!(body["notes"], "lot B");

    let (status, _) = app.patch("/car_inventory/999999", json!({ "quantity": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.patch(&format!("/car_inventory/{}", car), json!({ "quantity": -1 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    app.cleanup().await;
}

#[tokio::test]
async fn admin_cars_report_stock_and_acknowledge_mutations() {
    let app = app_or_skip!();
    let cat = app.category("Roadster").await;

    let (status, body) = app
        .post("/admin/cars", json!({ "category_id": cat, "modelnum": "RD-1", "price": 45000 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Car created successfully");
    let car = body["car_id"].as_i64().unwrap();

    let (status, body) = app.put(&format!("/admin/cars/{}/stock", car), json!({ "quantity": 4 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Stock updated successfully", "car_id": car }));

    let (_, body) = app.get(&format!("/admin/cars/{}", car)).await;
    assert_eq!(body["quantity"], 4);
    assert_eq!(body["modelnum"], "RD-1");

    sqlx::query("DELETE FROM car_inventory WHERE car_id = $1")
        .bind(car as i32)
        .execute(&app.pool)
        .await
        .unwrap();
    let (_, rows) = app.get("/admin/cars").await;
    assert_eq!(rows[0]["quantity"], 0);

    let (status, body) = app.delete(&format!("/admin/cars/{}", car)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Car deleted successfully");
    app.cleanup().await;
}

#[tokio::test]
async fn inventory_logs_are_append_only() {
    let app = app_or_skip!();
    let cat = app.category("Pickup").await;
    let car = app.car(cat, json!({})).await;
    let (_, rows) = app.get(&format!("/car_inventory/cars/{}/inventory", car)).await;
    let inventory_id = rows[0]["inventory_id"].as_i64().unwrap();

    let (status, log) = app
        .post(
            "/car_inventory_log",
            json!({ "inventory_id": inventory_id, "car_id": car, "quantity": 2, "unit_price": 9000, "received_date": "2024-03-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let log_id = log["log_id"].as_i64().unwrap();
    assert_eq!(log["received_date"], "2024-03-01");

    let (status, _) = app.delete(&format!("/car_inventory_log/{}", log_id)).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (_, overview) = app.get(&format!("/cars/{}/overview", car)).await;
    assert_eq!(overview["inventory_logs"][0]["log_id"], log_id);
    assert_eq!(overview["inventory"]["quantity"], 10);

    let (status, _) = app.delete(&format!("/cars/{}", car)).await;
    assert_eq!(status, StatusCode::OK);
    app.cleanup().await;
}
