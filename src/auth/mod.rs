pub mod accounts;

pub use accounts::*;

use thiserror::Error;
use uuid::Uuid;

use crate::crypto::CryptoError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Wrong password")]
    WrongPassword,

    #[error("Account already exists: {0}")]
    AccountExists(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Corrupted account data")]
    CorruptedAccount,

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Authenticated-identity collaborator.
///
/// The monitoring session consults this before every read or write that
/// touches per-user state; without a valid identity, writes fail closed and
/// reads come back empty.
pub trait IdentityProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;
    fn current_user_id(&self) -> Option<Uuid>;
}

/// Fixed identity — test double and embedder shim.
pub struct StaticIdentity {
    user_id: Option<Uuid>,
}

impl StaticIdentity {
    /// An identity that is always authenticated as the given user.
    pub fn authenticated(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// An identity that is never authenticated.
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    fn current_user_id(&self) -> Option<Uuid> {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_identity_authenticated() {
        let user = Uuid::new_v4();
        let identity = StaticIdentity::authenticated(user);
        assert!(identity.is_authenticated());
        assert_eq!(identity.current_user_id(), Some(user));
    }

    #[test]
    fn static_identity_anonymous() {
        let identity = StaticIdentity::anonymous();
        assert!(!identity.is_authenticated());
        assert!(identity.current_user_id().is_none());
    }
}
