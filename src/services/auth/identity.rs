use serde::Serialize;

/// A verified `(username, role)` pair.
///
/// Only produced by successful credential verification or successful token
/// decoding, so the constructor stays crate-private and the fields read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    username: String,
    role: String,
}

impl Identity {
    pub(crate) fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}
