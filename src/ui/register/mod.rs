mod action;
mod reducer;
mod state;

pub use action::RegisterAction;
pub use reducer::RegisterReducer;
pub use state::RegisterState;

/// View-local store of the register form.
pub type RegisterStore = crate::store::Store<RegisterReducer>;
