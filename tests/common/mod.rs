//! In-process test harness: the full router over a throwaway schema in the database named by `DATABASE_URL`.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use dealership_api::{app, connect, ensure_database_exists, ensure_schema, AppConfig, AppState};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub schema: String,
}

/// Build the app against a fresh schema, or `None` when `DATABASE_URL` is not set.
pub async fn spawn() -> Option<TestApp> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty())?;
    let schema = format!("test_{}", Uuid::new_v4().simple());
    let config = AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some(url.clone()),
        "DEALERSHIP_SCHEMA" => Some(schema.clone()),
        "DB_MAX_CONNECTIONS" => Some("3".to_string()),
        _ => None,
    })
    .expect("test config");
    ensure_database_exists(&config.database_url).await.expect("create test database");
    let pool = connect(&config).await.expect("connect to test database");
    ensure_schema(&pool, &schema).await.expect("create test schema");
    let router = app(AppState::new(pool.clone()), &config);
    Some(TestApp { router, pool, schema })
}

/// Bind a [`TestApp`] or return early from the test when no database is configured.
macro_rules! app_or_skip {
    () => {
        match common::spawn().await {
            Some(app) => app,
            None => {
                eprintln!("DATABASE_URL not set; skipping");
                return;
            }
        }
    };
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        let resp = self.router.clone().oneshot(req).await.expect("infallible");
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Drop the schema and close the pool.
    pub async fn cleanup(self) {
        let drop = format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", self.schema);
        sqlx::query(&drop).execute(&self.pool).await.expect("drop test schema");
        self.pool.close().await;
    }

    // Fixture helpers. Each asserts the expected creation status and returns the new id.

    pub async fn category(&self, name: &str) -> i64 {
        let (status, body) = self.post("/categories", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["category_id"].as_i64().expect("category_id")
    }

    pub async fn car(&self, category_id: i64, fields: Value) -> i64 {
        let mut payload = json!({ "category_id": category_id, "modelnum": format!("M-{}", Uuid::new_v4().simple()) });
        if let (Some(obj), Some(extra)) = (payload.as_object_mut(), fields.as_object()) {
            obj.extend(extra.clone());
        }
        let (status, body) = self.post("/cars", payload).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["car_id"].as_i64().expect("car_id")
    }

    pub async fn user(&self, username: &str, password: &str) -> i64 {
        let (status, body) = self
            .post(
                "/users",
                json!({
                    "email": format!("{}@example.com", username),
                    "username": username,
                    "password": password
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["user_id"].as_i64().expect("user_id")
    }

    pub async fn purchase(&self, user_id: i64, amount: f64, status: &str) -> i64 {
        let (code, body) = self
            .post(
                "/purchases",
                json!({ "user_id": user_id, "amount": amount, "status": status }),
            )
            .await;
        assert_eq!(code, StatusCode::CREATED, "{body}");
        body["purchase_id"].as_i64().expect("purchase_id")
    }
}
