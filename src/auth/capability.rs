//! Per-request authentication decisions.

use super::error::AuthError;
use super::holder::AuthHolder;
use super::secure::SecureString;

/// Decides which credential, if any, an outgoing request carries.
///
/// An interactor without a capability sends unauthenticated requests.
pub trait AuthCapability: Send + Sync {
    /// Resolve the credential for the next request.
    ///
    /// `Ok(None)` sends the request without credentials.
    fn credential(&self) -> Result<Option<SecureString>, AuthError>;
}

/// Requires the holder to have a credential; fails otherwise.
pub struct RequireCredential {
    holder: AuthHolder,
}

impl RequireCredential {
    pub fn new(holder: AuthHolder) -> Self {
        Self { holder }
    }
}

impl AuthCapability for RequireCredential {
    fn credential(&self) -> Result<Option<SecureString>, AuthError> {
        match self.holder.current_token() {
            Some(token) if !token.is_empty() => Ok(Some(token)),
            _ => Err(AuthError::MissingCredential),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use std::sync::Arc;

    fn holder() -> AuthHolder {
        AuthHolder::new(Arc::new(MemoryTokenStore::new()))
    }

    #[test]
    fn require_credential_fails_without_token() {
        let capability = RequireCredential::new(holder());
        assert!(matches!(
            capability.credential(),
            Err(AuthError::MissingCredential)
        ));
    }

    #[test]
    fn require_credential_returns_token() {
        let holder = holder();
        holder.save_token(SecureString::new("tok")).unwrap();
        let capability = RequireCredential::new(holder);
        assert_eq!(capability.credential().unwrap().unwrap().expose(), "tok");
    }
}
