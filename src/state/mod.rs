//! Process-wide state shared by every view.

mod global;
mod models;

pub use global::{GlobalAction, GlobalReducer, GlobalState, GlobalStore};
pub use models::{Game, GameStatus, User};
