use thiserror::Error;

use crate::auth::AuthError;
use crate::events::EventError;
use crate::transport::TransportError;

use super::effects::SideEffect;

/// Failure of a single side effect.
#[derive(Debug, Error)]
pub enum SideEffectError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Event(#[from] EventError),

    /// The blocking task running the effect panicked or was cancelled.
    #[error("Side effect task did not finish: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// Errors returned by an interactor execution.
///
/// `Unauthenticated` and `Transport` happen before anything is dispatched.
/// `SideEffect` happens after the actions were applied; they are not rolled
/// back.
#[derive(Debug, Error)]
pub enum InteractorError {
    /// The auth capability refused to supply a credential.
    #[error("Request needs a credential: {0}")]
    Unauthenticated(#[source] AuthError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Side effect {failed} failed: {source}")]
    SideEffect {
        failed: SideEffect,
        /// Effects after `failed` that were not attempted.
        pending: Vec<SideEffect>,
        #[source]
        source: SideEffectError,
    },
}

impl InteractorError {
    /// Whether the interactor's actions were already dispatched.
    pub fn state_applied(&self) -> bool {
        matches!(self, InteractorError::SideEffect { .. })
    }

    /// Effects to hand back to [`Pipeline::retry_side_effects`](super::Pipeline::retry_side_effects).
    ///
    /// An event write the writer accepted but never confirmed is left out;
    /// it may still be delivered.
    pub fn retryable_effects(&self) -> Vec<SideEffect> {
        match self {
            InteractorError::SideEffect {
                failed,
                pending,
                source,
            } => {
                let unconfirmed = matches!(
                    source,
                    SideEffectError::Event(EventError::Unconfirmed { .. })
                );
                (!unconfirmed)
                    .then(|| failed.clone())
                    .into_iter()
                    .chain(pending.iter().cloned())
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// User-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            InteractorError::Unauthenticated(_) => "Please register first".to_string(),
            InteractorError::Transport(err) => err.user_message(),
            InteractorError::SideEffect { failed, .. } => match failed {
                SideEffect::SaveToken(_) => {
                    "Signed in, but the session could not be saved".to_string()
                }
                SideEffect::ClearToken => {
                    "Signed out, but the saved session could not be removed".to_string()
                }
                SideEffect::WriteEvent(_) => {
                    "Signed in, but live updates are unavailable".to_string()
                }
            },
        }
    }
}
