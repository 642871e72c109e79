//! Credential store interface used by login and registration.
use async_trait::async_trait;
use uuid::Uuid;

use crate::repos::error::RepoResult;

/// A stored `username -> (password digest, role)` record.
///
/// The digest never leaves the auth services; it is not serializable.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("role", &self.role)
            .finish()
    }
}

/// Implementations must be safe to share across concurrent requests.
///
/// - `lookup` is read-only and returns `Ok(None)` for an unknown username.
/// - `insert` is atomic; an existing username yields `RepoError::Conflict`.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn lookup(&self, username: &str) -> RepoResult<Option<CredentialRecord>>;

    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> RepoResult<CredentialRecord>;
}
