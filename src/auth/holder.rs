//! Process-wide holder of the current credential.

use std::sync::Arc;

use parking_lot::RwLock;

use super::error::AuthError;
use super::persistence::TokenPersistence;
use super::secure::SecureString;

/// Holds the credential issued by the server.
///
/// Interactors write it, the transport layer reads it. Clones share the
/// same slot. Writes go through the lock, so concurrent writers are
/// serialised; reads are point-in-time snapshots.
#[derive(Clone)]
pub struct AuthHolder {
    token: Arc<RwLock<Option<SecureString>>>,
    persistence: Arc<dyn TokenPersistence>,
}

impl AuthHolder {
    /// Create an empty holder backed by `persistence`.
    pub fn new(persistence: Arc<dyn TokenPersistence>) -> Self {
        Self {
            token: Arc::new(RwLock::new(None)),
            persistence,
        }
    }

    /// Load a previously persisted credential into the holder.
    pub fn restore(&self) -> Result<Option<SecureString>, AuthError> {
        let restored = self.persistence.load()?;
        let mut slot = self.token.write();
        *slot = restored.clone();
        tracing::debug!(restored = restored.is_some(), "Credential restore");
        Ok(restored)
    }

    /// Persist `token` and make it the current credential.
    ///
    /// Persistence happens first; if it fails the in-memory credential is
    /// left untouched.
    pub fn save_token(&self, token: SecureString) -> Result<(), AuthError> {
        let mut slot = self.token.write();
        self.persistence.save(&token)?;
        *slot = Some(token);
        tracing::info!("Credential saved");
        Ok(())
    }

    /// Snapshot of the current credential.
    pub fn current_token(&self) -> Option<SecureString> {
        self.token.read().clone()
    }

    /// Forget the credential in memory and in persistence (logout).
    ///
    /// The in-memory credential is dropped even if persistence fails, so
    /// no further request carries it.
    pub fn clear(&self) -> Result<(), AuthError> {
        let mut slot = self.token.write();
        *slot = None;
        self.persistence.clear()?;
        tracing::info!("Credential cleared");
        Ok(())
    }
}

impl std::fmt::Debug for AuthHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHolder")
            .field("token", &self.current_token())
            .finish()
    }
}
