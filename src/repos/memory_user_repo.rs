//! In-process credential store.
//!
//! Used when no `DATABASE_URL` is configured, and by tests. Contents are lost on
//! restart.
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::repos::credential_store::{CredentialRecord, CredentialStore};
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, CredentialRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> RepoError {
    RepoError::Unavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn lookup(&self, username: &str) -> RepoResult<Option<CredentialRecord>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(username).cloned())
    }

    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> RepoResult<CredentialRecord> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.contains_key(username) {
            return Err(RepoError::Conflict);
        }

        let record = CredentialRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role: role.to_string(),
        };
        users.insert(username.to_string(), record.clone());
        Ok(record)
    }
}
