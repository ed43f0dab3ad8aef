//! Terminal front end.
//!
//! The register form keeps its state in a view-local store
//! ([`register::RegisterStore`]); everything else renders from the global
//! store. Stores notify the event loop, which redraws from fresh snapshots.

pub mod app;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod register;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::run;
