//! `auth` segment endpoints.

use serde::{Deserialize, Serialize};

use crate::api::{Message, User};
use crate::client::{ClientInstance, ClientResult};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Endpoints under `/api/auth`.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ClientInstance,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ClientInstance) -> Self {
        Self { client }
    }

    /// Exchange email and password for an access token.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.client.post("/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<Message> {
        self.client.post("/register", request).await
    }

    /// Server-side acknowledgement only; the token must still be dropped locally.
    pub async fn logout(&self) -> ClientResult<Message> {
        self.client.post("/logout", &serde_json::json!({})).await
    }

    pub async fn me(&self) -> ClientResult<User> {
        self.client.get("/me").await
    }
}
