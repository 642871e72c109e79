/*
 * Responsibility
 * - tracing + panic hook
 * - Config -> collaborators (credential store, hasher) -> AuthService -> AppState
 * - Router assembly + global middleware
 * - axum::serve()
 *
 * Anything that fails here is fatal: the process never starts serving.
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::repos::{CredentialStore, InMemoryCredentialStore, PgCredentialStore};
use crate::services::auth::{Argon2Hasher, PasswordHashing, build_auth_service};
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG=info,rbac_auth=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting auth service in {:?} mode on {} (token transport: {})",
        config.app_env,
        config.addr,
        config.token_transport
    );

    let store = build_credential_store(&config).await?;
    let state = build_state(&config, store);
    let app = build_app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

async fn build_credential_store(config: &Config) -> Result<Arc<dyn CredentialStore>> {
    match &config.database_url {
        Some(url) => {
            let store = PgCredentialStore::connect(url)
                .await
                .context("credential store is unreachable")?;
            store
                .ensure_schema()
                .await
                .context("failed to prepare credential store schema")?;
            tracing::info!("credential store: postgres");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; credentials are kept in memory and lost on restart");
            Ok(Arc::new(InMemoryCredentialStore::new()))
        }
    }
}

/// Build process-level services and inject them into the shared state.
pub fn build_state(config: &Config, store: Arc<dyn CredentialStore>) -> AppState {
    let hasher: Arc<dyn PasswordHashing> = Arc::new(Argon2Hasher::recommended());
    build_state_with_hasher(config, store, hasher)
}

pub fn build_state_with_hasher(
    config: &Config,
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHashing>,
) -> AppState {
    AppState::new(build_auth_service(config, store, hasher))
}

/// The full application: v1 routes plus global middleware.
pub fn build_app(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
