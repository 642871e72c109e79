pub mod access;
pub mod csrf;
pub mod role;

use axum::Router;

use crate::services::auth::RequiredRoles;
use crate::state::AppState;

/// Gate a group of routes: authentication -> CSRF -> role check -> handler.
///
/// `route_layer` wraps outward, so the layer added last runs first.
pub fn protect(router: Router<AppState>, state: AppState, required: RequiredRoles) -> Router<AppState> {
    let router = role::apply(router, required);
    let router = csrf::apply(router, state.clone());
    access::apply(router, state)
}
