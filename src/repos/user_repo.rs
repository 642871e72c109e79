/*
 * Responsibility
 * - SQLx access to the `users` table (username, password digest, role)
 * - Maps unique violations to RepoError::Conflict
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::credential_store::{CredentialRecord, CredentialStore};
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    role: String,
}

impl From<UserRow> for CredentialRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            role: row.role,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> RepoResult<Self> {
        let pool = PgPool::connect(database_url).await.map_err(RepoError::Db)?;
        Ok(Self::new(pool))
    }

    /// Create the `users` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> RepoResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id            UUID PRIMARY KEY,
                username      TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role          TEXT NOT NULL,
                created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(RepoError::Db)?;

        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn lookup(&self, username: &str) -> RepoResult<Option<CredentialRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::Db)?;

        Ok(row.map(CredentialRecord::from))
    }

    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> RepoResult<CredentialRecord> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.into())
    }
}
