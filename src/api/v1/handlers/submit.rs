/*
 * Responsibility
 * - POST /submit: 更新系の代表。middleware で CSRF 検証済みの前提で処理する
 */
use axum::Json;

use crate::api::v1::dto::submit::{SubmitRequest, SubmitResponse};
use crate::error::AppError;

pub async fn submit(Json(req): Json<SubmitRequest>) -> Result<Json<SubmitResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_SUBMISSION", msg))?;

    tracing::info!(len = req.message.len(), "submission accepted");

    Ok(Json(SubmitResponse {
        accepted: true,
        message: req.message,
    }))
}
