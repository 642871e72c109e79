use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("invalid hashing parameters: {0}")]
    Params(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("stored password digest is malformed: {0}")]
    MalformedDigest(String),
}

/// One-way password hashing collaborator.
///
/// `verify` returns `Ok(false)` on a mismatch; `Err` is reserved for digests that
/// cannot be interpreted at all.
pub trait PasswordHashing: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, HashError>;
    fn verify(&self, digest: &str, password: &str) -> Result<bool, HashError>;
}

/// Argon2id with PHC-formatted digests and a random salt per hash.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// memory = 19456 KiB, iterations = 2, parallelism = 1
    pub fn recommended() -> Self {
        Self {
            params: Params::new(19_456, 2, 1, None).unwrap_or_default(),
        }
    }

    pub fn with_params(m_cost_kib: u32, t_cost: u32, p_cost: u32) -> Result<Self, HashError> {
        let params = Params::new(m_cost_kib, t_cost, p_cost, None)
            .map_err(|e| HashError::Params(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::recommended()
    }
}

impl PasswordHashing for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HashError::Hash(e.to_string()))?;
        Ok(digest.to_string())
    }

    fn verify(&self, digest: &str, password: &str) -> Result<bool, HashError> {
        let parsed =
            PasswordHash::new(digest).map_err(|e| HashError::MalformedDigest(e.to_string()))?;
        // Parameters come from the digest itself, so older digests keep verifying.
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::with_params(64, 1, 1).unwrap()
    }

    #[test]
    fn hash_then_verify_accepts_the_same_password() {
        let hasher = hasher();
        let digest = hasher.hash("pw123").unwrap();
        assert!(hasher.verify(&digest, "pw123").unwrap());
    }

    #[test]
    fn verify_rejects_a_different_password() {
        let hasher = hasher();
        let digest = hasher.hash("pw123").unwrap();
        assert!(!hasher.verify(&digest, "pw124").unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = hasher();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn digest_is_argon2id_phc() {
        assert!(hasher().hash("pw").unwrap().starts_with("$argon2id$"));
    }

    #[test]
    fn malformed_digest_is_an_error_not_a_mismatch() {
        let err = hasher().verify("plaintext-not-a-digest", "pw").unwrap_err();
        assert!(matches!(err, HashError::MalformedDigest(_)));
    }

    #[test]
    fn invalid_params_are_rejected() {
        assert!(matches!(
            Argon2Hasher::with_params(1, 0, 1),
            Err(HashError::Params(_))
        ));
    }
}
