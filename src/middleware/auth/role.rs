//! Authorization gate: attached Identity + required role set -> allow / 403.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{Identity, RequiredRoles, authorize};
use crate::state::AppState;

/// Restrict every route already added to `router` to `required` ("any of").
pub fn apply(router: Router<AppState>, required: RequiredRoles) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(required, role_middleware))
}

async fn role_middleware(
    State(required): State<RequiredRoles>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(err) = authorize(req.extensions().get::<Identity>(), &required) {
        let username = req
            .extensions()
            .get::<Identity>()
            .map(|identity| identity.username().to_string());
        tracing::warn!(
            error = %err,
            username = ?username,
            required = ?required.iter().collect::<Vec<_>>(),
            path = %req.uri().path(),
            "authorization denied"
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}
