/*
 * Responsibility
 * - GET /health (疎通用)
 * - 読み取り系なので CSRF は発行のみ (検証なし)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
