/*
 * Responsibility
 * - Load settings from the environment (signing key, transport, store, CORS)
 * - Validate them once at startup (missing/invalid => the process does not start)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::auth::token::SigningKey;
use crate::services::auth::transport::TokenTransport;

/// HS256 keys shorter than the digest size are rejected.
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Process-wide HMAC key. Loaded once, never reassigned.
    pub signing_key: SigningKey,
    pub token_transport: TokenTransport,
    pub cookie_secure: bool,

    // None => in-memory credential store
    pub database_url: Option<String>,

    pub cors_allowed_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be tested
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = lookup("APP_ENV")
            .map(|raw| AppEnv::parse(&raw))
            .unwrap_or(AppEnv::Development);

        let raw_key = lookup("AUTH_SIGNING_KEY").ok_or(ConfigError::Missing("AUTH_SIGNING_KEY"))?;
        if raw_key.trim().is_empty() {
            return Err(ConfigError::Missing("AUTH_SIGNING_KEY"));
        }
        if raw_key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(ConfigError::Invalid("AUTH_SIGNING_KEY"));
        }
        let signing_key = SigningKey::new(raw_key.into_bytes());

        let token_transport = match lookup("AUTH_TOKEN_TRANSPORT") {
            Some(raw) => TokenTransport::from_str(&raw)
                .map_err(|_| ConfigError::Invalid("AUTH_TOKEN_TRANSPORT"))?,
            None => TokenTransport::Cookie,
        };

        let cookie_secure = match lookup("AUTH_COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid("AUTH_COOKIE_SECURE"))?,
            None => app_env.is_production(),
        };

        let database_url = lookup("DATABASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout = lookup("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            addr,
            app_env,
            signing_key,
            token_transport,
            cookie_secure,
            database_url,
            cors_allowed_origins,
            request_timeout,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
