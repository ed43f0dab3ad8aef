//! Side effects run after an interactor's actions are dispatched.

use crate::auth::{AuthHolder, SecureString};
use crate::events::{EventConnection, OutboundEvent};

use super::error::{InteractorError, SideEffectError};

/// An effect that is not expressible as a state transition.
///
/// Interactors return these as plain values; [`SideEffectRunner`] performs
/// them in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    /// Persist and hold the issued credential.
    SaveToken(SecureString),
    /// Forget the credential (logout).
    ClearToken,
    /// Write one message to the event connection and wait for it to flush.
    WriteEvent(OutboundEvent),
}

impl SideEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SideEffect::SaveToken(_) => "save_token",
            SideEffect::ClearToken => "clear_token",
            SideEffect::WriteEvent(_) => "write_event",
        }
    }
}

impl std::fmt::Display for SideEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SideEffect::WriteEvent(event) => write!(f, "write_event({})", event.name()),
            other => f.write_str(other.name()),
        }
    }
}

/// Executes [`SideEffect`]s against the auth holder and event connection.
#[derive(Clone)]
pub struct SideEffectRunner {
    auth: AuthHolder,
    events: EventConnection,
}

impl SideEffectRunner {
    pub fn new(auth: AuthHolder, events: EventConnection) -> Self {
        Self { auth, events }
    }

    /// Run `effects` sequentially.
    ///
    /// Stops at the first failure and returns it together with the effects
    /// that did not run, so the caller can retry just those.
    pub async fn run(&self, effects: Vec<SideEffect>) -> Result<(), InteractorError> {
        let mut remaining = effects.into_iter();
        while let Some(effect) = remaining.next() {
            if let Err(source) = self.apply(&effect).await {
                let pending: Vec<SideEffect> = remaining.collect();
                tracing::warn!(
                    effect = %effect,
                    pending = pending.len(),
                    error = %source,
                    "Side effect failed"
                );
                return Err(InteractorError::SideEffect {
                    failed: effect,
                    pending,
                    source,
                });
            }
            tracing::debug!(effect = %effect, "Side effect applied");
        }
        Ok(())
    }

    async fn apply(&self, effect: &SideEffect) -> Result<(), SideEffectError> {
        // Token persistence does blocking file IO; keep it off the runtime thread.
        match effect {
            SideEffect::SaveToken(token) => {
                let auth = self.auth.clone();
                let token = token.clone();
                tokio::task::spawn_blocking(move || auth.save_token(token)).await??
            }
            SideEffect::ClearToken => {
                let auth = self.auth.clone();
                tokio::task::spawn_blocking(move || auth.clear()).await??
            }
            SideEffect::WriteEvent(event) => self.events.send(event).await?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::auth::{AuthError, TokenPersistence};
    use crate::events::EventConfig;

    struct SlowStore;

    impl TokenPersistence for SlowStore {
        fn save(&self, _token: &SecureString) -> Result<(), AuthError> {
            std::thread::sleep(Duration::from_millis(100));
            Ok(())
        }

        fn load(&self) -> Result<Option<SecureString>, AuthError> {
            Ok(None)
        }

        fn clear(&self) -> Result<(), AuthError> {
            std::thread::sleep(Duration::from_millis(100));
            Ok(())
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn slow_persistence_does_not_stall_other_tasks() {
        let runner = SideEffectRunner::new(
            AuthHolder::new(Arc::new(SlowStore)),
            EventConnection::disconnected(EventConfig::default()),
        );
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        tokio::spawn(async move { flag.store(true, Ordering::SeqCst) });

        runner
            .run(vec![SideEffect::SaveToken(SecureString::new("tok"))])
            .await
            .unwrap();

        assert!(ran.load(Ordering::SeqCst));
        assert_eq!(runner.auth.current_token().unwrap().expose(), "tok");

        runner.run(vec![SideEffect::ClearToken]).await.unwrap();
        assert!(runner.auth.current_token().is_none());
    }
}
