use crate::store::{Action, Reducer, State, Store};

use super::models::{Game, User};

/// State shared across all views: who is signed in and which game is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlobalState {
    pub current_user: Option<User>,
    pub current_game: Option<Game>,
}

impl State for GlobalState {}

impl GlobalState {
    pub fn is_signed_in(&self) -> bool {
        self.current_user.is_some()
    }
}

#[derive(Debug, Clone)]
pub enum GlobalAction {
    SetCurrentUser(User),
    /// Sign-out: forgets the user and any game they were in.
    ClearCurrentUser,
    SetCurrentGame(Game),
    ClearCurrentGame,
}

impl Action for GlobalAction {
    fn name(&self) -> &'static str {
        match self {
            GlobalAction::SetCurrentUser(_) => "SetCurrentUser",
            GlobalAction::ClearCurrentUser => "ClearCurrentUser",
            GlobalAction::SetCurrentGame(_) => "SetCurrentGame",
            GlobalAction::ClearCurrentGame => "ClearCurrentGame",
        }
    }
}

pub struct GlobalReducer;

impl Reducer for GlobalReducer {
    type State = GlobalState;
    type Action = GlobalAction;
    const SCOPE: &'static str = "global";

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            GlobalAction::SetCurrentUser(user) => GlobalState {
                current_user: Some(user),
                ..state
            },
            GlobalAction::ClearCurrentUser => GlobalState {
                current_user: None,
                current_game: None,
            },
            GlobalAction::SetCurrentGame(game) => GlobalState {
                current_game: Some(game),
                ..state
            },
            GlobalAction::ClearCurrentGame => GlobalState {
                current_game: None,
                ..state
            },
        }
    }
}

/// The process-wide store. Created once at startup and passed by handle.
pub type GlobalStore = Store<GlobalReducer>;
