use std::sync::Arc;

use crate::services::auth::credentials::CredentialVerifier;
use crate::services::auth::registration::Registrar;
use crate::services::auth::session::SessionIssuer;
use crate::services::auth::token::TokenCodec;
use crate::services::auth::transport::TokenTransport;

/// Process-level auth services shared by handlers and gates.
///
/// Login path: `verifier` -> `sessions`. Protected path: `codec` via the gates.
/// The two paths share only the codec.
#[derive(Clone, Debug)]
pub struct AuthService {
    codec: Arc<TokenCodec>,
    verifier: CredentialVerifier,
    registrar: Registrar,
    sessions: SessionIssuer,
}

impl AuthService {
    pub fn new(
        codec: Arc<TokenCodec>,
        verifier: CredentialVerifier,
        registrar: Registrar,
        sessions: SessionIssuer,
    ) -> Self {
        Self {
            codec,
            verifier,
            registrar,
            sessions,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn verifier(&self) -> &CredentialVerifier {
        &self.verifier
    }

    pub fn registrar(&self) -> &Registrar {
        &self.registrar
    }

    pub fn sessions(&self) -> &SessionIssuer {
        &self.sessions
    }

    /// The canonical token location every gate reads.
    pub fn transport(&self) -> TokenTransport {
        self.sessions.transport()
    }
}
