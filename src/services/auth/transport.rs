//! Where a token travels between client and server.
//!
//! One location is chosen per process (`TokenTransport`) and every gate reads
//! only that location through [`extract_token`]. A credential presented anywhere
//! else is ignored.

use std::{fmt, str::FromStr};

use axum::http::{HeaderMap, header};

pub const AUTH_COOKIE_NAME: &str = "auth_token";
pub const CSRF_COOKIE_NAME: &str = "csrf_token";
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTransport {
    /// `auth_token=<token>` HttpOnly cookie (bare token, no scheme prefix).
    Cookie,
    /// `Authorization: Bearer <token>`
    Header,
}

impl TokenTransport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cookie => "cookie",
            Self::Header => "header",
        }
    }
}

impl fmt::Display for TokenTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransport(pub String);

impl FromStr for TokenTransport {
    type Err = UnknownTransport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cookie" => Ok(Self::Cookie),
            "header" => Ok(Self::Header),
            other => Err(UnknownTransport(other.to_string())),
        }
    }
}

/// Pull the raw token from the canonical location, or `None` when absent/empty.
pub fn extract_token(headers: &HeaderMap, transport: TokenTransport) -> Option<&str> {
    let token = match transport {
        TokenTransport::Header => headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix(BEARER_PREFIX))?,
        TokenTransport::Cookie => read_cookie(headers, AUTH_COOKIE_NAME)?,
    };

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// First value of cookie `name` across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim())
}

/// `Set-Cookie` value for an HttpOnly cookie scoped to `/`.
pub fn session_cookie(name: &str, value: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{name}={value}; Path=/; Max-Age={max_age_seconds}; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that makes the browser drop cookie `name` immediately.
pub fn expired_cookie(name: &str, secure: bool) -> String {
    session_cookie(name, "", 0, secure)
}

pub fn bearer_value(token: &str) -> String {
    format!("{BEARER_PREFIX}{token}")
}
