pub mod auth;
pub mod config;
pub mod events;
pub mod interactor;
pub mod logging;
pub mod state;
pub mod store;
pub mod transport;
pub mod ui;
