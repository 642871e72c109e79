/// Factory: build `AuthService` from application `Config` and its collaborators.
use std::sync::Arc;

use crate::config::Config;
use crate::repos::CredentialStore;
use crate::services::auth::{
    AuthService, CredentialVerifier, PasswordHashing, Registrar, SessionIssuer, TokenCodec,
};

pub fn build_auth_service(
    config: &Config,
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHashing>,
) -> Arc<AuthService> {
    let codec = Arc::new(TokenCodec::new(&config.signing_key));

    let auth = AuthService::new(
        Arc::clone(&codec),
        CredentialVerifier::new(Arc::clone(&store), Arc::clone(&hasher)),
        Registrar::new(store, hasher),
        SessionIssuer::new(codec, config.token_transport, config.cookie_secure),
    );

    Arc::new(auth)
}
