/*
 * Responsibility
 * - Request/response DTOs for register, login, logout and identity routes
 * - validate() performs shape checks only (non-empty), nothing about credentials
 */
use serde::{Deserialize, Serialize};

use crate::services::auth::{Identity, IssuedSession, TokenTransport};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("username is required");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    /// Echoed only for header-transport clients; cookie clients never see it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

impl LoginResponse {
    pub fn from_session(session: &IssuedSession) -> Self {
        let credential = &session.credential;
        let header_client = credential.transport == TokenTransport::Header;

        Self {
            message: "Login successful",
            token: header_client.then(|| credential.token.clone()),
            token_type: header_client.then_some("Bearer"),
            expires_in: header_client.then_some(credential.expires_in),
            csrf_token: session.csrf_token.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub username: String,
    pub role: String,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            username: identity.username().to_string(),
            role: identity.role().to_string(),
        }
    }
}
