use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: u64,
    pub name: String,
}
