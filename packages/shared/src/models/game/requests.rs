use serde::{Deserialize, Serialize};

use super::{Position, Wall};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MakeMoveRequest {
    pub game_id: String,
    pub position: Position,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaceWallRequest {
    pub game_id: String,
    pub wall: Wall,
}

/// Body of actions that only name a game (resign, reconnect).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameRequest {
    pub game_id: String,
}
