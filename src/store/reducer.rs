//! Reducer trait.

use super::action::Action;
use super::state::State;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> State
///
/// Implementations match exhaustively over their action enum: a variant
/// without a handler does not compile, and a second handler for the same
/// variant is an unreachable pattern, which the crate lints deny.
pub trait Reducer: 'static {
    /// The state type this reducer operates on.
    type State: State;

    /// The action type this reducer handles.
    type Action: Action;

    /// Scope name used in logs (e.g. "global", "register").
    const SCOPE: &'static str;

    /// Process an action and return the new state.
    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
