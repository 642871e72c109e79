/*
 * Responsibility
 * - The only error type that reaches clients (AppError)
 * - IntoResponse: HTTP status + generic JSON body, never internal detail
 * - Conversions from service errors (collapse internal kinds here)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::{IssueError, RegisterError, VerifyError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    // Protected route: no/invalid/expired token
    #[error("Unauthorized")]
    Unauthorized,

    // Login: unknown user or wrong password (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden")]
    Forbidden,

    #[error("Username already exists")]
    Conflict,

    #[error("Internal server error")]
    Internal,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<VerifyError> for AppError {
    fn from(e: VerifyError) -> Self {
        if e.is_invalid_credentials() {
            AppError::InvalidCredentials
        } else {
            AppError::Internal
        }
    }
}

impl From<RegisterError> for AppError {
    fn from(e: RegisterError) -> Self {
        match e {
            RegisterError::Missing(_) => AppError::InvalidRequest(e.to_string()),
            RegisterError::Conflict => AppError::Conflict,
            RegisterError::Hash(_) | RegisterError::Store(_) | RegisterError::Task => {
                AppError::Internal
            }
        }
    }
}

impl From<IssueError> for AppError {
    fn from(_: IssueError) -> Self {
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::TokenError;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn login_failures_collapse_to_one_public_error() {
        let not_found: AppError = VerifyError::NotFound.into();
        let bad_password: AppError = VerifyError::BadPassword.into();

        assert_eq!(not_found.to_string(), "Invalid credentials");
        assert_eq!(bad_password.to_string(), not_found.to_string());
        assert_eq!(bad_password.status(), not_found.status());
    }

    #[test]
    fn verifier_backend_failures_are_internal() {
        let err: AppError = VerifyError::Task.into();
        assert!(matches!(err, AppError::Internal));
    }

    #[test]
    fn issuance_failures_are_internal() {
        let err: AppError = IssueError::Token(TokenError::Signing).into();
        assert!(matches!(err, AppError::Internal));
    }

    #[test]
    fn registration_errors_map_to_statuses() {
        let missing: AppError = RegisterError::Missing("role").into();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.to_string(), "role is required");

        let conflict: AppError = RegisterError::Conflict.into();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
    }
}
