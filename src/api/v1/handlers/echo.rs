//! Any-method endpoint. Used to check which methods reach the handler at all
//! (e.g. `OPTIONS`/`TRACE` pass through the guard untouched).
use axum::{Json, http::Method};
use serde_json::{Value, json};

pub async fn echo(method: Method) -> Json<Value> {
    Json(json!({"method": method.as_str()}))
}
