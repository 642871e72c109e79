//! Bearer-token authentication and role-based authorization service.
//!
//! Two independent pipelines share one token codec:
//! - login: credential verification -> session issuance (signed token, 24 h)
//! - protected routes: authentication gate -> role gate -> handler

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
