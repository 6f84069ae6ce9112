use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email (case-insensitive)
    #[oai(default)]
    pub email: String,

    /// Password for authentication
    #[oai(default)]
    pub password: String,
}

/// Response model containing the session token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for API authentication
    pub token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Unix timestamp at which the token stops being accepted
    pub expires_at: i64,
}
