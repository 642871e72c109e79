/*
 * Responsibility
 * - Role-protected pages; the gates have already run when these execute
 */
use axum::Json;

use crate::api::v1::dto::auth::{IdentityResponse, MessageResponse};
use crate::api::v1::extractors::CurrentIdentity;

pub async fn admin_dashboard() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to Admin Dashboard"))
}

pub async fn user_dashboard() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to User Dashboard"))
}

pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<IdentityResponse> {
    Json(identity.into())
}
