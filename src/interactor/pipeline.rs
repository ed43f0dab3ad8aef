//! Staged execution of an [`Interactor`].

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::auth::SecureString;
use crate::state::GlobalStore;
use crate::store::Store;
use crate::transport::ApiClient;

use super::effects::{SideEffect, SideEffectRunner};
use super::error::InteractorError;
use super::{Dispatch, Environment, Interactor, NoLocal, ResponseOf};

/// Runs one interactor against the global store and a local store.
///
/// A pipeline can be executed any number of times; each execution reads
/// the stores afresh.
pub struct Pipeline<I: Interactor> {
    interactor: I,
    global: GlobalStore,
    local: Store<I::Local>,
    api: ApiClient,
    effects: SideEffectRunner,
}

impl<I: Interactor> Pipeline<I> {
    pub fn new(interactor: I, env: &Environment, local: Store<I::Local>) -> Self {
        Self {
            interactor,
            global: env.global.clone(),
            local,
            api: env.api.clone(),
            effects: env.side_effects(),
        }
    }

    /// Run every stage once.
    pub async fn execute(&self) -> Result<(), InteractorError> {
        let execution_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "interactor",
            name = self.interactor.name(),
            %execution_id
        );
        self.run().instrument(span).await
    }

    /// Execute on a separate task.
    ///
    /// The UI does not need to await the handle; state changes reach it
    /// through store subscriptions. Awaiting the handle sequences this
    /// execution before whatever the caller does next.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<Result<(), InteractorError>> {
        tokio::spawn(async move { self.execute().await })
    }

    /// Re-run side effects returned by a failed execution.
    ///
    /// Actions are not dispatched again.
    pub async fn retry_side_effects(&self, effects: Vec<SideEffect>) -> Result<(), InteractorError> {
        let span = tracing::info_span!("interactor_retry", name = self.interactor.name());
        self.effects.run(effects).instrument(span).await
    }

    async fn run(&self) -> Result<(), InteractorError> {
        // Stages before the network call must not suspend, so the request
        // reflects the state at invocation time.
        let request = self.build();
        let credential = self.authorize()?;

        let response = match self.api.send(&request, credential).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, error_type = err.error_type(), "Request failed");
                return Err(err.into());
            }
        };

        self.dispatch(&response);

        let effects = self.interactor.side_effects(&response);
        self.effects.run(effects).await?;

        tracing::info!("Interactor completed");
        Ok(())
    }

    fn build(&self) -> I::Request {
        let global = self.global.state();
        let local = self.local.state();
        self.interactor.build_request(&global, &local)
    }

    fn authorize(&self) -> Result<Option<SecureString>, InteractorError> {
        match self.interactor.auth() {
            Some(capability) => capability.credential().map_err(|err| {
                tracing::warn!(error = %err, "Credential unavailable");
                InteractorError::Unauthenticated(err)
            }),
            None => Ok(None),
        }
    }

    fn dispatch(&self, response: &ResponseOf<I>) {
        let actions = self.interactor.actions(response);
        tracing::debug!(count = actions.len(), "Dispatching actions");
        for action in actions {
            match action {
                Dispatch::Global(action) => self.global.dispatch(action),
                Dispatch::Local(action) => self.local.dispatch(action),
            }
        }
    }
}

impl<I: Interactor<Local = NoLocal>> Pipeline<I> {
    /// Pipeline for an interactor without a local scope.
    pub fn global_only(interactor: I, env: &Environment) -> Self {
        Self::new(interactor, env, Store::new())
    }
}
