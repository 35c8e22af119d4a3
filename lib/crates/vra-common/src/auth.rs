use serde::{Deserialize, Serialize};

/// Body of `POST identity/api/tokens`.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
    pub tenant: String,
}

/// Bearer token issued by the identity service.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The token itself, sent back as `Authorization: Bearer <id>`.
    pub id: String,
    #[serde(default)]
    pub expires: Option<String>,
}
