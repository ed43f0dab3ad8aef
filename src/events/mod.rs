//! Persistent event channel to the server.
//!
//! Outbound writes go through [`EventConnection`], which preserves program
//! order; inbound server events are turned into global actions by
//! [`EventListener`].

mod connection;
mod error;
mod listener;
mod message;

pub use connection::{EventConfig, EventConnection};
pub use error::EventError;
pub use listener::EventListener;
pub use message::{OutboundEvent, ServerEvent};
