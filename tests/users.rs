#[macro_use]
mod common;

use axum::http::StatusCode;
use serde_json::json;

async fn user_count(app: &common::TestApp) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn duplicate_registration_is_rejected_without_writing() {
    let app = app_or_skip!();
    app.user("ann", "pw-1").await;
    assert_eq!(user_count(&app).await, 1);

    let (status, body) = app
        .post("/users", json!({ "email": "ann@example.com", "username": "other", "password": "x" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already registered");

    let (status, body) = app
        .post("/users", json!({ "email": "new@example.com", "username": "ann", "password": "x" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Username already taken");

    assert_eq!(user_count(&app).await, 1);
    app.cleanup().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn racing_duplicate_registrations_get_a_400() {
    let app = app_or_skip!();
    for round in 0..5 {
        let payload = json!({
            "email": format!("twin{}@example.com", round),
            "username": format!("twin{}", round),
            "password": "pw"
        });
        let (first, second) = tokio::join!(app.post("/users", payload.clone()), app.post("/users", payload.clone()));
        let mut statuses = [first.0, second.0];
        statuses.sort();
        assert_eq!(statuses, [StatusCode::CREATED, StatusCode::BAD_REQUEST], "{} / {}", first.1, second.1);

        let rejected = if first.0 == StatusCode::BAD_REQUEST { &first.1 } else { &second.1 };
        let detail = rejected["detail"].as_str().unwrap();
        assert!(detail == "Email already registered" || detail == "Username already taken", "{detail}");
    }
    assert_eq!(user_count(&app).await, 5);
    app.cleanup().await;
}

#[tokio::test]
async fn login_checks_the_password() {
    let app = app_or_skip!();
    let id = app.user("bob", "correct horse").await;

    let (status, body) = app
        .post("/users/login", json!({ "email": "bob@example.com", "password": "wrong" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid email or password");

    let (status, _) = app
        .post("/users/login", json!({ "email": "nobody@example.com", "password": "correct horse" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post("/users/login", json!({ "email": "bob@example.com", "password": "correct horse" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Login successful", "user_id": id, "username": "bob" }));
    app.cleanup().await;
}

#[tokio::test]
async fn passwords_are_hashed_and_never_returned() {
    let app = app_or_skip!();
    let id = app.user("cat", "s3cret").await;

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE user_id = $1")
        .bind(id as i32)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert!(stored.starts_with("$argon2"));

    let (_, one) = app.get(&format!("/users/{}", id)).await;
    assert!(one.get("password").is_none());
    let (_, all) = app.get("/users").await;
    assert!(all[0].get("password").is_none());
    let (_, activity) = app.get(&format!("/users/{}/all", id)).await;
    assert!(activity.get("password").is_none());
    assert_eq!(activity["reviews"], json!([]));
    app.cleanup().await;
}

#[tokio::test]
async fn malformed_email_is_a_validation_error() {
    let app = app_or_skip!();
    let (status, body) = app
        .post("/users", json!({ "email": "not-an-email", "username": "dan", "password": "pw" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "validation_error");
    assert_eq!(user_count(&app).await, 0);
    app.cleanup().await;
}

#[tokio::test]
async fn admin_user_mutations_acknowledge() {
    let app = app_or_skip!();
    let id = app.user("eve", "pw").await;

    let (status, body) = app.put(&format!("/admin/users/{}", id), json!({ "address": "1 Main St" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "User updated successfully", "user_id": id }));

    let (_, details) = app.get(&format!("/admin/users/{}", id)).await;
    assert_eq!(details["address"], "1 Main St");
    assert_eq!(details["purchases"], json!([]));

    let (status, body) = app.delete(&format!("/admin/users/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");
    let (status, _) = app.delete(&format!("/admin/users/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    app.cleanup().await;
}
