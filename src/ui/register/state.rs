use crate::store::State;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegisterState {
    pub name: String,
    /// A registration request is in flight.
    pub submitting: bool,
    /// Message of the last failed attempt, cleared on edit or resubmit.
    pub error: Option<String>,
}

impl State for RegisterState {}

impl RegisterState {
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.trimmed_name().is_empty()
    }
}
