//! Session restore at startup and logout.

use std::sync::Arc;

use crate::auth::{AuthCapability, AuthHolder, RequireCredential};
use crate::events::OutboundEvent;
use crate::state::{GlobalAction, GlobalState, GlobalStore, User};
use crate::transport::{ApiRequest, Method};

use super::{
    Dispatch, Interactor, InteractorError, NoLocal, NoLocalAction, NoLocalState, SideEffect,
    SideEffectRunner,
};

/// `GET /users/me`
#[derive(Debug, Clone, Default)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = User;

    fn method(&self) -> Method {
        Method::Get
    }

    fn path(&self) -> String {
        "/users/me".to_string()
    }
}

/// Resolves the user behind a persisted token and re-binds the event
/// stream to it.
pub struct RestoreSession {
    auth: AuthHolder,
}

impl RestoreSession {
    pub fn new(auth: AuthHolder) -> Self {
        Self { auth }
    }
}

impl Interactor for RestoreSession {
    type Request = CurrentUserRequest;
    type Local = NoLocal;

    fn name(&self) -> &'static str {
        "restore_session"
    }

    fn build_request(&self, _global: &GlobalState, _local: &NoLocalState) -> CurrentUserRequest {
        CurrentUserRequest
    }

    fn auth(&self) -> Option<Arc<dyn AuthCapability>> {
        Some(Arc::new(RequireCredential::new(self.auth.clone())))
    }

    fn actions(&self, user: &User) -> Vec<Dispatch<NoLocalAction>> {
        vec![Dispatch::Global(GlobalAction::SetCurrentUser(user.clone()))]
    }

    fn side_effects(&self, _user: &User) -> Vec<SideEffect> {
        // The token may have been cleared while the request was in flight.
        self.auth
            .current_token()
            .map(|token| SideEffect::WriteEvent(OutboundEvent::Authenticate { token }))
            .into_iter()
            .collect()
    }
}

/// Sign out: clear the current user, then forget the credential.
///
/// The user is signed out in memory even when forgetting the persisted
/// token fails; the error is still returned.
pub async fn logout(global: &GlobalStore, effects: &SideEffectRunner) -> Result<(), InteractorError> {
    tracing::info!("Logging out");
    global.dispatch(GlobalAction::ClearCurrentUser);
    effects.run(vec![SideEffect::ClearToken]).await
}
