/*
 * Responsibility
 * - GET /form: ブラウザがフォームを開く入口
 * - トークンは middleware がレスポンスに付与する (handler はトークンを扱わない)
 */
use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn form(State(state): State<AppState>) -> Json<Value> {
    let config = state.csrf.config();

    // Tell the client which header to echo the token back in.
    Json(json!({
        "csrf_header": config.header_name().as_str(),
        "csrf_cookie": config.cookie_name(),
    }))
}
