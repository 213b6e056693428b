pub mod requests;
pub mod responses;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const BOARD_SIZE: i32 = 9;
pub const WALLS_PER_PLAYER: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Pending,
    InProgress,
    Completed,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Win,
    Resign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    Move,
    PlaceWall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

/// A wall sits between two cells and is two cells long.
///
/// A horizontal wall separates rows `position_1.y` and `position_2.y` and
/// covers columns `position_1.x` and `position_1.x + 1`. A vertical wall
/// separates columns `position_1.x` and `position_2.x` and covers rows
/// `position_1.y` and `position_1.y + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    pub direction: Direction,
    pub position_1: Position,
    pub position_2: Position,
}

impl Wall {
    pub fn new(direction: Direction, position_1: Position, position_2: Position) -> Self {
        Wall {
            direction,
            position_1,
            position_2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: String,
    pub position: Position,
    /// Row the player has to reach.
    pub goal: i32,
    /// Walls left to place.
    pub walls: i32,
}

impl Player {
    pub fn new(user_id: &str, position: Position, goal: i32) -> Self {
        Player {
            user_id: user_id.to_string(),
            position,
            goal,
            walls: WALLS_PER_PLAYER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub user_id: String,
    #[serde(rename = "type")]
    pub move_type: MoveType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall: Option<Wall>,
    pub timestamp: DateTime<Utc>,
}

impl Move {
    pub fn step(user_id: &str, position: Position) -> Self {
        Move {
            user_id: user_id.to_string(),
            move_type: MoveType::Move,
            position: Some(position),
            wall: None,
            timestamp: Utc::now(),
        }
    }

    pub fn wall(user_id: &str, wall: Wall) -> Self {
        Move {
            user_id: user_id.to_string(),
            move_type: MoveType::PlaceWall,
            position: None,
            wall: Some(wall),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    pub status: GameStatus,
    /// User id of the player to act.
    pub turn: String,
    pub player_1: Player,
    pub player_2: Player,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub moves: Vec<Move>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<EndReason>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Bumped on every committed change, used for conditional writes.
    #[serde(default)]
    pub version: u64,
}

impl Game {
    pub fn new(user1_id: &str, user2_id: &str) -> Self {
        let now = Utc::now();
        Game {
            game_id: Uuid::new_v4().to_string(),
            status: GameStatus::InProgress,
            turn: user1_id.to_string(),
            player_1: Player::new(user1_id, Position::new(BOARD_SIZE / 2, 0), BOARD_SIZE - 1),
            player_2: Player::new(user2_id, Position::new(BOARD_SIZE / 2, BOARD_SIZE - 1), 0),
            walls: vec![],
            moves: vec![],
            winner: None,
            end_reason: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
            version: 0,
        }
    }

    pub fn is_player(&self, user_id: &str) -> bool {
        self.player_1.user_id == user_id || self.player_2.user_id == user_id
    }

    pub fn player(&self, user_id: &str) -> Option<&Player> {
        if self.player_1.user_id == user_id {
            Some(&self.player_1)
        } else if self.player_2.user_id == user_id {
            Some(&self.player_2)
        } else {
            None
        }
    }

    pub fn player_mut(&mut self, user_id: &str) -> Option<&mut Player> {
        if self.player_1.user_id == user_id {
            Some(&mut self.player_1)
        } else if self.player_2.user_id == user_id {
            Some(&mut self.player_2)
        } else {
            None
        }
    }

    pub fn opponent(&self, user_id: &str) -> Option<&Player> {
        if self.player_1.user_id == user_id {
            Some(&self.player_2)
        } else if self.player_2.user_id == user_id {
            Some(&self.player_1)
        } else {
            None
        }
    }

    /// Hands the turn to the other player.
    pub fn pass_turn(&mut self) {
        self.turn = if self.turn == self.player_1.user_id {
            self.player_2.user_id.clone()
        } else {
            self.player_1.user_id.clone()
        };
    }

    /// Ends the game with `winner_id` as the winner.
    pub fn complete(&mut self, winner_id: &str, reason: EndReason) {
        let now = Utc::now();
        self.status = GameStatus::Completed;
        self.winner = Some(winner_id.to_string());
        self.end_reason = Some(reason);
        self.completed_at = Some(now);
    }
}
