use crate::store::Action;

#[derive(Debug, Clone)]
pub enum RegisterAction {
    /// Replace the name being typed.
    SetName(String),
    Submitted,
    Failed(String),
    Succeeded,
}

impl Action for RegisterAction {
    fn name(&self) -> &'static str {
        match self {
            RegisterAction::SetName(_) => "SetName",
            RegisterAction::Submitted => "Submitted",
            RegisterAction::Failed(_) => "Failed",
            RegisterAction::Succeeded => "Succeeded",
        }
    }
}
