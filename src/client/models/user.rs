//! User and authentication payloads

use serde::{Deserialize, Serialize};

/// Signed-in user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID
    pub id: String,

    /// Account email
    pub email: String,

    /// Display name (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Payload returned by `/users/login` and `/users/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque auth token (usually a JWT)
    pub token: String,

    /// The authenticated user
    pub user: UserProfile,
}

/// Request body for `/users/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
