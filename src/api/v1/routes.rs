/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 読み取り系 (GET /form) はトークン発行のみ、更新系 (POST/PUT/DELETE) は検証対象
 * - CSRF guard 自体は app.rs で v1 全体に layer として掛ける
 */
use axum::{
    Router,
    routing::{any, get, post, put},
};

use crate::api::v1::handlers::{
    echo::echo,
    form::form,
    health::health,
    items::{delete_item, update_item},
    submit::submit,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/form", get(form))
        .route("/submit", post(submit))
        .route("/items/{item_id}", put(update_item).delete(delete_item))
        .route("/echo", any(echo))
}
