//! Event channel wire messages.
//!
//! One JSON document per line in both directions.

use serde::{Deserialize, Serialize, Serializer};

use crate::auth::SecureString;
use crate::state::{Game, GlobalAction};

/// Messages the client writes to the event channel.
///
/// Outbound messages are untagged; each variant has its own fixed key set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutboundEvent {
    /// Associates the already-open stream with a credential: `{"token":"..."}`.
    Authenticate {
        #[serde(serialize_with = "expose_token")]
        token: SecureString,
    },
}

fn expose_token<S: Serializer>(token: &SecureString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(token.expose())
}

impl OutboundEvent {
    /// Compact single-line JSON encoding.
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::Authenticate { .. } => "authenticate",
        }
    }
}

/// Messages the server pushes on the event channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    GameUpdated { game: Game },
    GameEnded { game_id: String },
}

impl ServerEvent {
    /// Map to the global action it implies given the current game id.
    ///
    /// `GameEnded` for a game other than the current one maps to nothing.
    pub fn to_action(&self, current_game_id: Option<&str>) -> Option<GlobalAction> {
        match self {
            ServerEvent::GameUpdated { game } => Some(GlobalAction::SetCurrentGame(game.clone())),
            ServerEvent::GameEnded { game_id } => {
                (current_game_id == Some(game_id.as_str())).then_some(GlobalAction::ClearCurrentGame)
            }
        }
    }
}
