/*
 * Responsibility
 * - URL structure of v1
 * - Public routes vs gated groups; each gated group declares its required roles here
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    auth::{login, logout, register},
    dashboard::{admin_dashboard, me, user_dashboard},
    health::health,
};
use crate::middleware::auth::protect;
use crate::services::auth::RequiredRoles;
use crate::state::AppState;

pub const ADMIN_ROLE: &str = "Admin";
pub const USER_ROLE: &str = "User";

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout));

    let admin = protect(
        Router::new().route("/admin/dashboard", get(admin_dashboard)),
        state.clone(),
        RequiredRoles::any_of([ADMIN_ROLE]),
    );

    let user = protect(
        Router::new().route("/user/dashboard", get(user_dashboard)),
        state.clone(),
        RequiredRoles::any_of([USER_ROLE]),
    );

    let any_member = protect(
        Router::new().route("/me", get(me)),
        state,
        RequiredRoles::any_of([ADMIN_ROLE, USER_ROLE]),
    );

    public.merge(admin).merge(user).merge(any_member)
}
