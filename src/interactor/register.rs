//! Register a new user and bind the event stream to the issued token.

use serde::{Deserialize, Serialize};

use crate::auth::SecureString;
use crate::events::OutboundEvent;
use crate::state::{GlobalAction, GlobalState, User};
use crate::transport::{ApiRequest, Method};
use crate::ui::register::{RegisterAction, RegisterReducer, RegisterState};

use super::{Dispatch, Interactor, SideEffect};

/// `POST /users`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;

    fn method(&self) -> Method {
        Method::Post
    }

    fn path(&self) -> String {
        "/users".to_string()
    }

    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        serde_json::to_value(self).map(Some)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub user: User,
    pub token: SecureString,
}

/// Registers the name typed into the register form.
///
/// Registration is unauthenticated. On success the user becomes current,
/// then the token is saved, then announced on the event connection.
#[derive(Debug, Default)]
pub struct RegisterUser;

impl Interactor for RegisterUser {
    type Request = RegisterRequest;
    type Local = RegisterReducer;

    fn name(&self) -> &'static str {
        "register_user"
    }

    fn build_request(&self, _global: &GlobalState, local: &RegisterState) -> RegisterRequest {
        RegisterRequest {
            name: local.trimmed_name().to_string(),
        }
    }

    fn actions(&self, response: &RegisterResponse) -> Vec<Dispatch<RegisterAction>> {
        vec![Dispatch::Global(GlobalAction::SetCurrentUser(
            response.user.clone(),
        ))]
    }

    fn side_effects(&self, response: &RegisterResponse) -> Vec<SideEffect> {
        vec![
            SideEffect::SaveToken(response.token.clone()),
            SideEffect::WriteEvent(OutboundEvent::Authenticate {
                token: response.token.clone(),
            }),
        ]
    }
}
