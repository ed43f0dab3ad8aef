//! Base trait for actions.

use std::fmt::Debug;

/// Marker trait for action values.
///
/// Actions are pure data carrying only what the reducer needs to compute
/// the next state. Each scope defines one closed enum of actions, so the
/// full set is known at compile time.
pub trait Action: Clone + Debug + Send + 'static {
    /// Tag of this action, used for logging.
    fn name(&self) -> &'static str;
}
