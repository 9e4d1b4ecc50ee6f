/*
 * Responsibility
 * - POST /submit の request/response DTO
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub message: String,
}

impl SubmitRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.message.trim().is_empty() {
            return Err("message is required");
        }
        if self.message.len() > 1024 {
            return Err("message must be <= 1024 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub accepted: bool,
    pub message: String,
}
