use serde::{Deserialize, Serialize};

/// A registered player as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    InProgress,
    Finished,
}

/// The game session the current user takes part in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub status: GameStatus,
    #[serde(default)]
    pub players: Vec<User>,
}

impl Game {
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }
}
