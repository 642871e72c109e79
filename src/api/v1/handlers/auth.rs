/*
 * Responsibility
 * - POST /auth/register, /auth/login, /auth/logout
 * - Body shape errors -> 400; credential failures -> one generic 401
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::v1::dto::auth::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::error::AppError;
use crate::services::auth::VerifyError;
use crate::state::AppState;

fn invalid_body(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection, "rejected request body");
    AppError::InvalidRequest("invalid request body".to_string())
}

fn with_cookies(mut response: Response, cookies: Vec<String>) -> Result<Response, AppError> {
    for cookie in cookies {
        let value = HeaderValue::from_str(&cookie).map_err(|e| {
            tracing::error!(error = %e, "set-cookie value is not a valid header");
            AppError::Internal
        })?;
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    Ok(response)
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(req) = payload.map_err(invalid_body)?;

    state
        .auth
        .registrar()
        .register(&req.username, &req.password, &req.role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload.map_err(invalid_body)?;
    req.validate()
        .map_err(|msg| AppError::InvalidRequest(msg.to_string()))?;

    let identity = match state.auth.verifier().verify(&req.username, &req.password).await {
        Ok(identity) => identity,
        Err(err @ (VerifyError::NotFound | VerifyError::BadPassword)) => {
            tracing::warn!(username = %req.username, reason = %err, "login rejected");
            return Err(err.into());
        }
        Err(err) => {
            tracing::error!(username = %req.username, error = %err, "login failed");
            return Err(err.into());
        }
    };

    let sessions = state.auth.sessions();
    let session = sessions.issue(&identity)?;

    tracing::info!(username = %identity.username(), role = %identity.role(), "login succeeded");

    let response = (StatusCode::OK, Json(LoginResponse::from_session(&session))).into_response();
    with_cookies(response, session.set_cookies(sessions.cookie_secure()))
}

/// Stateless logout: expire the cookies; an already-issued token stays valid
/// until its own `exp`.
pub async fn logout(State(state): State<AppState>) -> Result<Response, AppError> {
    let response = (
        StatusCode::OK,
        Json(MessageResponse::new("Logged out successfully")),
    )
        .into_response();
    with_cookies(response, state.auth.sessions().clear_cookies())
}
