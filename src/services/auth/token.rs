//! Token codec: signs and verifies the claims carried by a bearer token.
//!
//! Tokens are compact HS256 JWTs over `{username, role, exp}`. Signature and
//! expiry are both checked on every decode; expiry is checked here rather than by
//! `jsonwebtoken` so the caller can distinguish `Expired` and supply its own clock.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::services::auth::identity::Identity;

/// Fixed lifetime of every issued token (24 hours).
pub const TOKEN_TTL_SECONDS: i64 = 86_400;

pub fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECONDS)
}

/// Process-wide HMAC secret.
///
/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct SigningKey(Arc<[u8]>);

impl SigningKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Arc::from(bytes.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}

/// The only data carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    username: String,
    role: String,
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    expires_at: DateTime<Utc>,
}

impl Claims {
    fn new(identity: &Identity, expires_at: DateTime<Utc>) -> Self {
        Self {
            username: identity.username().to_string(),
            role: identity.role().to_string(),
            expires_at,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn into_identity(self) -> Identity {
        Identity::new(self.username, self.role)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("token signature mismatch")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token")]
    Signing,
    #[error("token lifetime is out of range")]
    ExpiryOutOfRange,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(key: &SigningKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` presence is still enforced; its value is checked in `decode_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
        }
    }

    pub fn mint(&self, identity: &Identity, ttl: Duration) -> Result<String, TokenError> {
        self.mint_at(identity, ttl, Utc::now())
    }

    pub fn mint_at(
        &self,
        identity: &Identity,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = Claims::new(identity, expires_at);

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign token");
            TokenError::Signing
        })
    }

    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_at(token, Utc::now())
    }

    /// Verify the signature, then require `exp > now`.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })?;

        let claims = data.claims;
        if claims.expires_at <= now {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
