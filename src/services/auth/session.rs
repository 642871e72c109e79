use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use thiserror::Error;
use tracing::{debug, error};

use crate::services::auth::identity::Identity;
use crate::services::auth::token::{TOKEN_TTL_SECONDS, TokenCodec, TokenError, token_ttl};
use crate::services::auth::transport::{
    AUTH_COOKIE_NAME, CSRF_COOKIE_NAME, TokenTransport, bearer_value, expired_cookie,
    session_cookie,
};

#[derive(Debug, Error)]
pub enum IssueError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("entropy source unavailable: {0}")]
    Entropy(String),
}

/// A minted token plus how it has to be carried.
#[derive(Clone, Debug)]
pub struct TransportCredential {
    pub token: String,
    pub transport: TokenTransport,
    /// Seconds until the token expires (always the fixed 24 h TTL).
    pub expires_in: i64,
}

impl TransportCredential {
    /// `Authorization` header value for header-transport clients.
    pub fn authorization_value(&self) -> String {
        bearer_value(&self.token)
    }

    pub fn set_cookie(&self, secure: bool) -> String {
        session_cookie(AUTH_COOKIE_NAME, &self.token, self.expires_in, secure)
    }
}

/// Result of a successful login.
#[derive(Clone, Debug)]
pub struct IssuedSession {
    pub credential: TransportCredential,
    /// Double-submit token; only issued with cookie transport.
    pub csrf_token: Option<String>,
}

impl IssuedSession {
    /// `Set-Cookie` values to attach to the login response (empty for header transport).
    pub fn set_cookies(&self, secure: bool) -> Vec<String> {
        if self.credential.transport != TokenTransport::Cookie {
            return Vec::new();
        }

        let mut cookies = vec![self.credential.set_cookie(secure)];
        if let Some(csrf) = &self.csrf_token {
            cookies.push(session_cookie(
                CSRF_COOKIE_NAME,
                csrf,
                self.credential.expires_in,
                secure,
            ));
        }
        cookies
    }
}

/// Turns a verified identity into a transport credential.
#[derive(Clone, Debug)]
pub struct SessionIssuer {
    codec: Arc<TokenCodec>,
    transport: TokenTransport,
    cookie_secure: bool,
}

impl SessionIssuer {
    pub fn new(codec: Arc<TokenCodec>, transport: TokenTransport, cookie_secure: bool) -> Self {
        Self {
            codec,
            transport,
            cookie_secure,
        }
    }

    pub fn transport(&self) -> TokenTransport {
        self.transport
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    /// Exactly one `mint` per call, always with the fixed TTL.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedSession, IssueError> {
        let token = self.codec.mint(identity, token_ttl())?;

        let csrf_token = match self.transport {
            TokenTransport::Cookie => Some(generate_csrf_token()?),
            TokenTransport::Header => None,
        };

        debug!(
            username = %identity.username(),
            role = %identity.role(),
            transport = %self.transport,
            "session issued"
        );

        Ok(IssuedSession {
            credential: TransportCredential {
                token,
                transport: self.transport,
                expires_in: TOKEN_TTL_SECONDS,
            },
            csrf_token,
        })
    }

    /// `Set-Cookie` values for logout. Stateless: the token itself stays valid
    /// until its `exp`.
    pub fn clear_cookies(&self) -> Vec<String> {
        match self.transport {
            TokenTransport::Cookie => vec![
                expired_cookie(AUTH_COOKIE_NAME, self.cookie_secure),
                expired_cookie(CSRF_COOKIE_NAME, self.cookie_secure),
            ],
            TokenTransport::Header => Vec::new(),
        }
    }
}

fn generate_csrf_token() -> Result<String, IssueError> {
    // 32 bytes of entropy -> URL-safe base64 without padding.
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes).map_err(|e| {
        error!(error = %e, "getrandom failed");
        IssueError::Entropy(e.to_string())
    })?;

    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::token::SigningKey;

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(&SigningKey::new(
            b"session-test-key-0123456789abcdef".to_vec(),
        )))
    }

    fn bob() -> Identity {
        Identity::new("bob", "Admin")
    }

    #[test]
    fn issued_token_decodes_to_the_identity() {
        let codec = codec();
        let issuer = SessionIssuer::new(codec.clone(), TokenTransport::Header, false);
        let session = issuer.issue(&bob()).unwrap();

        let claims = codec.decode(&session.credential.token).unwrap();
        assert_eq!(claims.into_identity(), bob());
        assert_eq!(session.credential.expires_in, 86_400);
    }

    #[test]
    fn header_transport_has_no_cookies_or_csrf() {
        let issuer = SessionIssuer::new(codec(), TokenTransport::Header, true);
        let session = issuer.issue(&bob()).unwrap();

        assert!(session.csrf_token.is_none());
        assert!(session.set_cookies(true).is_empty());
        assert!(issuer.clear_cookies().is_empty());
        assert_eq!(
            session.credential.authorization_value(),
            format!("Bearer {}", session.credential.token)
        );
    }

    #[test]
    fn cookie_transport_sets_auth_and_csrf_cookies() {
        let issuer = SessionIssuer::new(codec(), TokenTransport::Cookie, true);
        let session = issuer.issue(&bob()).unwrap();
        let csrf = session.csrf_token.clone().unwrap();
        let cookies = session.set_cookies(issuer.cookie_secure());

        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].starts_with(&format!("auth_token={};", session.credential.token)));
        assert!(cookies[0].contains("Max-Age=86400"));
        assert!(cookies[0].contains("HttpOnly"));
        assert!(cookies[0].ends_with("; Secure"));
        assert!(cookies[1].starts_with(&format!("csrf_token={csrf};")));
    }

    #[test]
    fn csrf_tokens_are_random_and_url_safe() {
        let a = generate_csrf_token().unwrap();
        let b = generate_csrf_token().unwrap();

        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn logout_expires_both_cookies() {
        let issuer = SessionIssuer::new(codec(), TokenTransport::Cookie, false);
        let cookies = issuer.clear_cookies();

        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
        assert!(cookies[0].starts_with("auth_token=;"));
        assert!(cookies[1].starts_with("csrf_token=;"));
    }
}
