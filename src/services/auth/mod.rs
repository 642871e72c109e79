pub mod auth_service;
pub mod authenticate;
pub mod authorize;
pub mod credentials;
pub mod factory;
pub mod identity;
pub mod password;
pub mod registration;
pub mod session;
pub mod token;
pub mod transport;

pub use auth_service::AuthService;
pub use authenticate::{AuthnError, authenticate};
pub use authorize::{AuthzError, RequiredRoles, authorize};
pub use credentials::{CredentialVerifier, VerifyError};
pub use factory::build_auth_service;
pub use identity::Identity;
pub use password::{Argon2Hasher, HashError, PasswordHashing};
pub use registration::{RegisterError, Registrar};
pub use session::{IssueError, IssuedSession, SessionIssuer, TransportCredential};
pub use token::{Claims, SigningKey, TokenCodec, TokenError};
pub use transport::TokenTransport;
