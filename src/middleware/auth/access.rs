//! Authentication gate: token (canonical location) -> Identity in request extensions.
//!
//! Every failure is answered with the same `401 Unauthorized`; which sub-case
//! occurred (missing, malformed, bad signature, expired) only goes to the log.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::authenticate;
use crate::state::AppState;

/// Apply the authentication gate to every route already added to `router`.
///
/// Must be layered outside (after, in call order) the role gate so it runs first:
/// ```ignore
/// let admin = middleware::auth::role::apply(admin, RequiredRoles::any_of(["Admin"]));
/// let admin = middleware::auth::access::apply(admin, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = match authenticate(req.headers(), state.auth.transport(), state.auth.codec()) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(
                error = %err,
                method = %req.method(),
                path = %req.uri().path(),
                "authentication failed"
            );
            return Err(AppError::Unauthorized);
        }
    };

    tracing::debug!(username = %identity.username(), role = %identity.role(), "authenticated");

    // middleware -> downstream gates / extractor
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
