/*
 * Responsibility
 * - PUT/DELETE /items/{item_id}: 更新系 (CSRF 検証対象)
 * - 永続化はしない (guard の動作確認用)
 */
use axum::{Json, extract::Path, http::StatusCode};

use crate::api::v1::dto::items::{ItemResponse, UpdateItemRequest};
use crate::error::AppError;

pub async fn update_item(
    Path(item_id): Path<u64>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("INVALID_ITEM", "name is required"));
    }

    Ok(Json(ItemResponse {
        id: item_id,
        name: req.name,
    }))
}

pub async fn delete_item(Path(item_id): Path<u64>) -> StatusCode {
    tracing::info!(item_id, "item deleted");
    StatusCode::NO_CONTENT
}
