//! Response helpers. Bodies are the rows themselves, no envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// Admin mutation acknowledgement: `{"message": "Car created successfully", "car_id": 7}`.
pub fn ack(entity: &str, verb: &str, key: &str, id: i32) -> Json<Value> {
    let mut body = Map::new();
    body.insert("message".into(), Value::String(format!("{} {} successfully", entity, verb)));
    body.insert(key.into(), Value::from(id));
    Json(Value::Object(body))
}
