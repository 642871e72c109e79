use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;

use crate::services::auth::identity::Identity;

/// Set of roles a route accepts ("any of", exact case-sensitive match).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRoles(Arc<BTreeSet<String>>);

impl RequiredRoles {
    pub fn any_of<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Arc::new(roles.into_iter().map(Into::into).collect()))
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("no authenticated identity attached to the request")]
    MissingIdentity,
    #[error("role '{role}' is not permitted")]
    RoleNotPermitted { role: String },
}

/// Allow iff an identity is present and its role is one of `required`.
///
/// A missing identity means the authentication gate did not run; that is never
/// an implicit allow.
pub fn authorize(identity: Option<&Identity>, required: &RequiredRoles) -> Result<(), AuthzError> {
    let identity = identity.ok_or(AuthzError::MissingIdentity)?;

    if required.contains(identity.role()) {
        Ok(())
    } else {
        Err(AuthzError::RoleNotPermitted {
            role: identity.role().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_role_is_allowed() {
        let identity = Identity::new("alice", "User");
        assert_eq!(authorize(Some(&identity), &RequiredRoles::any_of(["User"])), Ok(()));
    }

    #[test]
    fn role_match_is_case_sensitive() {
        let identity = Identity::new("root", "admin");
        assert_eq!(
            authorize(Some(&identity), &RequiredRoles::any_of(["Admin"])),
            Err(AuthzError::RoleNotPermitted {
                role: "admin".into()
            })
        );
    }

    #[test]
    fn multiple_roles_mean_any_of() {
        let identity = Identity::new("alice", "User");
        assert!(authorize(Some(&identity), &RequiredRoles::any_of(["Admin", "User"])).is_ok());
        assert!(authorize(Some(&identity), &RequiredRoles::any_of(["Admin"])).is_err());
    }

    #[test]
    fn no_partial_or_wildcard_matching() {
        let required = RequiredRoles::any_of(["Admin"]);
        for role in ["Admin ", " Admin", "Adm", "Administrator", "*", ""] {
            let identity = Identity::new("x", role);
            assert!(authorize(Some(&identity), &required).is_err(), "{role:?}");
        }
    }

    #[test]
    fn missing_identity_is_forbidden() {
        assert_eq!(
            authorize(None, &RequiredRoles::any_of(["User"])),
            Err(AuthzError::MissingIdentity)
        );
    }

    #[test]
    fn empty_requirement_allows_nobody() {
        let identity = Identity::new("alice", "User");
        let required = RequiredRoles::any_of(Vec::<String>::new());
        assert!(authorize(Some(&identity), &required).is_err());
    }
}
