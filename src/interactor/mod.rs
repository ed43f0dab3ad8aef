//! Request → actions → side-effects orchestration.
//!
//! An [`Interactor`] describes one remote operation as a set of stages; a
//! [`Pipeline`] runs them in a fixed order:
//!
//! ```text
//! build ─→ authorize ─→ send/decode ─→ dispatch ─→ side effects
//!  (sync)     (sync)       (await)       (sync)       (await)
//! ```
//!
//! Nothing is dispatched unless the response decoded successfully, and
//! every action is applied before the first side effect runs.

mod effects;
mod error;
mod pipeline;
mod register;
mod session;

use std::sync::Arc;

use crate::auth::{AuthCapability, AuthHolder};
use crate::events::EventConnection;
use crate::state::{GlobalAction, GlobalState, GlobalStore};
use crate::store::{Action, Reducer, State};
use crate::transport::{ApiClient, ApiRequest};

pub use effects::{SideEffect, SideEffectRunner};
pub use error::{InteractorError, SideEffectError};
pub use pipeline::Pipeline;
pub use register::{RegisterRequest, RegisterResponse, RegisterUser};
pub use session::{logout, CurrentUserRequest, RestoreSession};

/// Response type of an interactor's request.
pub type ResponseOf<I> = <<I as Interactor>::Request as ApiRequest>::Response;
/// State type of an interactor's local scope.
pub type LocalStateOf<I> = <<I as Interactor>::Local as Reducer>::State;
/// Action type of an interactor's local scope.
pub type LocalActionOf<I> = <<I as Interactor>::Local as Reducer>::Action;

/// Target scope of an action produced from a response.
#[derive(Debug, Clone)]
pub enum Dispatch<L> {
    Global(GlobalAction),
    Local(L),
}

/// One remote operation, described stage by stage.
pub trait Interactor: Send + Sync + 'static {
    type Request: ApiRequest;

    /// Reducer of the view-local store this interactor reads and writes.
    /// Use [`NoLocal`] when it only touches global state.
    type Local: Reducer;

    fn name(&self) -> &'static str;

    /// Derive the request from the state at the moment of invocation.
    fn build_request(&self, global: &GlobalState, local: &LocalStateOf<Self>) -> Self::Request;

    /// Auth capability consulted before sending. `None` sends the request
    /// without credentials.
    fn auth(&self) -> Option<Arc<dyn AuthCapability>> {
        None
    }

    /// Actions to dispatch, in order, for a successful response.
    fn actions(&self, response: &ResponseOf<Self>) -> Vec<Dispatch<LocalActionOf<Self>>>;

    /// Effects to run, in order, after every action has been dispatched.
    fn side_effects(&self, _response: &ResponseOf<Self>) -> Vec<SideEffect> {
        Vec::new()
    }
}

/// Process-wide collaborators shared by every pipeline.
#[derive(Clone)]
pub struct Environment {
    pub global: GlobalStore,
    pub api: ApiClient,
    pub auth: AuthHolder,
    pub events: EventConnection,
}

impl Environment {
    pub fn side_effects(&self) -> SideEffectRunner {
        SideEffectRunner::new(self.auth.clone(), self.events.clone())
    }
}

/// Empty local scope for interactors that only touch global state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoLocalState;

impl State for NoLocalState {}

#[derive(Debug, Clone)]
pub enum NoLocalAction {}

impl Action for NoLocalAction {
    fn name(&self) -> &'static str {
        match *self {}
    }
}

pub struct NoLocal;

impl Reducer for NoLocal {
    type State = NoLocalState;
    type Action = NoLocalAction;
    const SCOPE: &'static str = "none";

    fn reduce(_state: Self::State, action: Self::Action) -> Self::State {
        match action {}
    }
}
