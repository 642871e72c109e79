/*
 * Responsibility
 * - What the credential store reports upward (conflict vs backend failure)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("conflict")]
    Conflict,
    #[error("db error")]
    Db(#[source] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl RepoError {
    /// Unique violations become `Conflict`; everything else stays a db error.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
        {
            return RepoError::Conflict;
        }
        RepoError::Db(e)
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
