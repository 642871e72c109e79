/*
 * Responsibility
 * - Public surface of v1 (routes() re-export)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::{ADMIN_ROLE, USER_ROLE, routes};
