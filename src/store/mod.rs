//! Unidirectional state store primitives.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                                 │
//!    └─────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable value owned by a [`Store`]
//! - **Action**: Closed enum of intents, one per scope
//! - **Reducer**: Pure function `(State, Action) -> State`
//!
//! The same [`Store`] type backs both the process-wide global scope and the
//! per-view local scopes; only the reducer (and so the state shape) differs.

mod action;
mod reducer;
mod state;
mod store;

pub use action::Action;
pub use reducer::Reducer;
pub use state::State;
pub use store::{Store, Subscription};
