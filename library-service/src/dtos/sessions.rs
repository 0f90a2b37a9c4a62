use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct OpenSessionRequest {
    #[validate(length(min = 4, message = "Access code must be at least 4 characters"))]
    pub access_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_key: String,
    pub document_count: usize,
}
