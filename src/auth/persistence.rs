//! Credential persistence backends.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::error::AuthError;
use super::secure::SecureString;

/// Durable storage for the current credential.
///
/// The storage medium is up to the implementation; callers only rely on
/// each call either succeeding or returning a reportable error.
pub trait TokenPersistence: Send + Sync {
    /// Store `token`, replacing any previous one.
    fn save(&self, token: &SecureString) -> Result<(), AuthError>;

    /// Load the stored token, if any.
    fn load(&self) -> Result<Option<SecureString>, AuthError>;

    /// Forget the stored token. Succeeds when nothing is stored.
    fn clear(&self) -> Result<(), AuthError>;
}

/// Stores the token as a single line in a file.
///
/// On Unix the file is created with `0600` permissions.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        file.write_all(contents.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()
    }
}

impl TokenPersistence for FileTokenStore {
    fn save(&self, token: &SecureString) -> Result<(), AuthError> {
        self.write_file(token.expose())
            .map_err(|source| AuthError::Persistence {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), "Token persisted");
        Ok(())
    }

    fn load(&self) -> Result<Option<SecureString>, AuthError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SecureString::new(token)))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AuthError::Persistence {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(AuthError::Persistence {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Keeps the token in memory only. Used for `--ephemeral` sessions and tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SecureString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenPersistence for MemoryTokenStore {
    fn save(&self, token: &SecureString) -> Result<(), AuthError> {
        *self.token.lock() = Some(token.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SecureString>, AuthError> {
        Ok(self.token.lock().clone())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.token.lock() = None;
        Ok(())
    }
}
