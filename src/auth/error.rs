use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the credential layer.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential store could not be read or written.
    #[error("Failed to persist credential at '{path}': {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A request requires a credential but none is held.
    #[error("No credential available; register or log in first")]
    MissingCredential,
}
