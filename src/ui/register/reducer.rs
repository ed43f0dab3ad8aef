use crate::store::Reducer;

use super::action::RegisterAction;
use super::state::RegisterState;

pub struct RegisterReducer;

impl Reducer for RegisterReducer {
    type State = RegisterState;
    type Action = RegisterAction;
    const SCOPE: &'static str = "register";

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            RegisterAction::SetName(name) => RegisterState { name, ..state },
            RegisterAction::Submitted => RegisterState {
                submitting: true,
                error: None,
                ..state
            },
            RegisterAction::Failed(message) => RegisterState {
                submitting: false,
                error: Some(message),
                ..state
            },
            RegisterAction::Succeeded => RegisterState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(name: &str) -> RegisterState {
        RegisterReducer::reduce(
            RegisterState::default(),
            RegisterAction::SetName(name.to_string()),
        )
    }

    #[test]
    fn test_set_name_changes_only_name() {
        let starts = [
            RegisterState {
                name: "foo".to_string(),
                ..RegisterState::default()
            },
            RegisterState {
                name: "foo".to_string(),
                submitting: false,
                error: Some("Name taken".to_string()),
            },
            RegisterState {
                name: "foo".to_string(),
                submitting: true,
                error: None,
            },
        ];

        for foo in starts {
            let bar = RegisterReducer::reduce(foo.clone(), RegisterAction::SetName("bar".into()));
            assert_eq!(
                bar,
                RegisterState {
                    name: "bar".to_string(),
                    ..foo
                }
            );

            let again =
                RegisterReducer::reduce(bar.clone(), RegisterAction::SetName("bar".into()));
            assert_eq!(again, bar);
        }
    }

    #[test]
    fn test_blank_name_cannot_submit() {
        assert!(!typed("   ").can_submit());
        assert!(typed(" ada ").can_submit());
        assert_eq!(typed(" ada ").trimmed_name(), "ada");
    }

    #[test]
    fn test_submitted_blocks_resubmit() {
        let state = RegisterReducer::reduce(typed("ada"), RegisterAction::Submitted);
        assert!(state.submitting);
        assert!(!state.can_submit());
    }

    #[test]
    fn test_failure_keeps_name_and_records_error() {
        let state = RegisterReducer::reduce(typed("ada"), RegisterAction::Submitted);
        let state = RegisterReducer::reduce(state, RegisterAction::Failed("Name taken".into()));
        assert!(!state.submitting);
        assert_eq!(state.name, "ada");
        assert_eq!(state.error.as_deref(), Some("Name taken"));

        let state = RegisterReducer::reduce(state, RegisterAction::Submitted);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_success_resets_form() {
        let state = RegisterReducer::reduce(typed("ada"), RegisterAction::Submitted);
        let state = RegisterReducer::reduce(state, RegisterAction::Succeeded);
        assert_eq!(state, RegisterState::default());
    }
}
