use axum::http::HeaderMap;
use thiserror::Error;

use crate::services::auth::identity::Identity;
use crate::services::auth::token::{TokenCodec, TokenError};
use crate::services::auth::transport::{TokenTransport, extract_token};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthnError {
    #[error("no token in the {0} location")]
    MissingToken(TokenTransport),
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Authentication decision for one request: token present, signature valid, not expired.
///
/// The caller collapses every error into a single "unauthorized" response; the
/// variants exist for logging.
pub fn authenticate(
    headers: &HeaderMap,
    transport: TokenTransport,
    codec: &TokenCodec,
) -> Result<Identity, AuthnError> {
    let token = extract_token(headers, transport).ok_or(AuthnError::MissingToken(transport))?;
    let claims = codec.decode(token)?;
    Ok(claims.into_identity())
}
