/*
 * Responsibility
 * - Public interface of the middleware layers
 * - auth: authentication / CSRF / role gates for protected route groups
 * - cors, http, security_headers: applied once to the whole Router
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
