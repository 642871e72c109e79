use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::repos::{CredentialStore, RepoError};
use crate::services::auth::identity::Identity;
use crate::services::auth::password::{HashError, PasswordHashing};

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("username already exists")]
    Conflict,
    #[error("password hashing failure")]
    Hash(#[source] HashError),
    #[error("credential store failure")]
    Store(#[source] RepoError),
    #[error("password hashing task failed")]
    Task,
}

/// Creates credential records: hash the password, then insert atomically.
///
/// Roles are free-form labels; any non-empty value is accepted.
#[derive(Clone)]
pub struct Registrar {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHashing>,
}

impl std::fmt::Debug for Registrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registrar")
            .field("store", &self.store.backend_name())
            .finish()
    }
}

impl Registrar {
    pub fn new(store: Arc<dyn CredentialStore>, hasher: Arc<dyn PasswordHashing>) -> Self {
        Self { store, hasher }
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<Identity, RegisterError> {
        let username = username.trim();
        let role = role.trim();
        if username.is_empty() {
            return Err(RegisterError::Missing("username"));
        }
        if password.is_empty() {
            return Err(RegisterError::Missing("password"));
        }
        if role.is_empty() {
            return Err(RegisterError::Missing("role"));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let digest = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                error!(error = %e, "password hashing task panicked");
                RegisterError::Task
            })?
            .map_err(|e| {
                error!(error = %e, "failed to hash password");
                RegisterError::Hash(e)
            })?;

        let record = self
            .store
            .insert(username, &digest, role)
            .await
            .map_err(|e| match e {
                RepoError::Conflict => RegisterError::Conflict,
                other => {
                    error!(error = %other, "failed to insert credential record");
                    RegisterError::Store(other)
                }
            })?;

        info!(username = %record.username, role = %record.role, "user registered");
        Ok(Identity::new(record.username, record.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::InMemoryCredentialStore;
    use crate::services::auth::credentials::CredentialVerifier;
    use crate::services::auth::password::Argon2Hasher;

    fn parts() -> (Arc<InMemoryCredentialStore>, Arc<dyn PasswordHashing>) {
        (
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(Argon2Hasher::with_params(64, 1, 1).unwrap()),
        )
    }

    #[tokio::test]
    async fn registered_user_can_be_verified() {
        let (store, hasher) = parts();
        let registrar = Registrar::new(store.clone(), hasher.clone());
        let verifier = CredentialVerifier::new(store.clone(), hasher);

        let identity = registrar.register("alice", "pw123", "User").await.unwrap();
        assert_eq!(identity.role(), "User");

        let stored = store.lookup("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "pw123");

        let verified = verifier.verify("alice", "pw123").await.unwrap();
        assert_eq!(verified, identity);
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let (store, hasher) = parts();
        let registrar = Registrar::new(store, hasher);
        registrar.register("alice", "pw123", "User").await.unwrap();

        let err = registrar.register("alice", "other", "Admin").await.unwrap_err();
        assert!(matches!(err, RegisterError::Conflict));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let (store, hasher) = parts();
        let registrar = Registrar::new(store.clone(), hasher);

        assert!(matches!(
            registrar.register("  ", "pw", "User").await,
            Err(RegisterError::Missing("username"))
        ));
        assert!(matches!(
            registrar.register("bob", "", "User").await,
            Err(RegisterError::Missing("password"))
        ));
        assert!(matches!(
            registrar.register("bob", "pw", " ").await,
            Err(RegisterError::Missing("role"))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn username_and_role_are_trimmed() {
        let (store, hasher) = parts();
        let registrar = Registrar::new(store.clone(), hasher);

        let identity = registrar.register(" carol ", "pw", " Admin ").await.unwrap();
        assert_eq!(identity.username(), "carol");
        assert_eq!(identity.role(), "Admin");
        assert!(store.lookup("carol").await.unwrap().is_some());
    }
}
