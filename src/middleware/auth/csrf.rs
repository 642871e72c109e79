//! Double-submit CSRF check for cookie transport.
//!
//! State-changing requests must echo the `csrf_token` cookie in `X-CSRF-Token`.
//! Header transport is not ambient (browsers never attach it), so the gate is a
//! no-op there.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Method, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::TokenTransport;
use crate::services::auth::transport::{CSRF_COOKIE_NAME, CSRF_HEADER_NAME, read_cookie};
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, csrf_middleware))
}

async fn csrf_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if state.auth.transport() == TokenTransport::Cookie
        && is_state_changing(req.method())
        && !csrf_matches(req.headers())
    {
        tracing::warn!(method = %req.method(), path = %req.uri().path(), "csrf check failed");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}

fn is_state_changing(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn csrf_matches(headers: &HeaderMap) -> bool {
    let cookie = read_cookie(headers, CSRF_COOKIE_NAME).filter(|v| !v.is_empty());
    let header = headers
        .get(CSRF_HEADER_NAME)
        .and_then(|v| v.to_str().ok())
        .map(str::trim);

    match (cookie, header) {
        (Some(cookie), Some(header)) => constant_time_eq(cookie.as_bytes(), header.as_bytes()),
        _ => false,
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
