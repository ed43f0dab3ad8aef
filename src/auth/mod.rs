//! Credential handling.
//!
//! The [`AuthHolder`] owns the server-issued token for the process
//! lifetime; [`TokenPersistence`] keeps it across restarts and
//! [`AuthCapability`] decides per request whether it is attached.

mod capability;
mod error;
mod holder;
mod persistence;
mod secure;

pub use capability::{AuthCapability, RequireCredential};
pub use error::AuthError;
pub use holder::AuthHolder;
pub use persistence::{FileTokenStore, MemoryTokenStore, TokenPersistence};
pub use secure::SecureString;
