use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::repos::{CredentialStore, RepoError};
use crate::services::auth::identity::Identity;
use crate::services::auth::password::{HashError, PasswordHashing};

/// Login-time verification failures.
///
/// `NotFound` and `BadPassword` are kept apart for logs and tests only; the HTTP
/// layer collapses both into one "invalid credentials" response.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("unknown username")]
    NotFound,
    #[error("password mismatch")]
    BadPassword,
    #[error("credential store failure")]
    Store(#[source] RepoError),
    #[error("password hashing failure")]
    Hash(#[source] HashError),
    #[error("password verification task failed")]
    Task,
}

impl VerifyError {
    /// True for the two outcomes that mean "wrong username or password".
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::NotFound | Self::BadPassword)
    }
}

/// Checks a submitted username/password against the credential store.
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHashing>,
    // Verified against when the username is unknown, so both failure paths
    // pay for one hash verification.
    decoy_digest: Option<Arc<str>>,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("store", &self.store.backend_name())
            .finish()
    }
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn CredentialStore>, hasher: Arc<dyn PasswordHashing>) -> Self {
        let decoy_digest = match hasher.hash("decoy-password-for-unknown-users") {
            Ok(digest) => Some(Arc::from(digest)),
            Err(e) => {
                error!(error = %e, "failed to prepare decoy digest");
                None
            }
        };

        Self {
            store,
            hasher,
            decoy_digest,
        }
    }

    /// The username is trimmed before lookup, the same way registration stores it.
    pub async fn verify(&self, username: &str, password: &str) -> Result<Identity, VerifyError> {
        let username = username.trim();
        let record = self
            .store
            .lookup(username)
            .await
            .map_err(VerifyError::Store)?;

        let Some(record) = record else {
            if let Some(decoy) = self.decoy_digest.clone() {
                // Result is irrelevant; only the time spent matters.
                let _ = self.check_password(decoy, password.to_string()).await;
            }
            debug!(username = %username, "login for unknown username");
            return Err(VerifyError::NotFound);
        };

        let matches = self
            .check_password(Arc::from(record.password_hash), password.to_string())
            .await?;

        if !matches {
            debug!(username = %username, "login with wrong password");
            return Err(VerifyError::BadPassword);
        }

        Ok(Identity::new(record.username, record.role))
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    async fn check_password(&self, digest: Arc<str>, password: String) -> Result<bool, VerifyError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&digest, &password))
            .await
            .map_err(|e| {
                error!(error = %e, "password verification task panicked");
                VerifyError::Task
            })?
            .map_err(VerifyError::Hash)
    }
}
