use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Game;

/// Frames pushed to players over the websocket.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GameResponse {
    GameState {
        game: Game,
        timestamp: DateTime<Utc>,
    },
    Queued {
        player_id: String,
        timestamp: DateTime<Utc>,
    },
    Error {
        error: String,
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl GameResponse {
    pub fn game_state(game: &Game) -> Self {
        GameResponse::GameState {
            game: game.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn queued(player_id: &str) -> Self {
        GameResponse::Queued {
            player_id: player_id.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        GameResponse::Error {
            error: code.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}
