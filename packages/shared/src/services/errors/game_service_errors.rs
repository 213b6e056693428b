use crate::repositories::errors::game_repository_errors::GameRepositoryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameServiceError {
    GameNotFound,
    GameNotInProgress,
    NotPlayersTurn,
    NotAPlayer,
    InvalidMove,
    InvalidWallPlacement,
    /// A game needs two distinct, non-empty player ids.
    InvalidPlayers,
    InternalError(String),
}

impl GameServiceError {
    /// Stable identifier sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            GameServiceError::GameNotFound => "game_not_found",
            GameServiceError::GameNotInProgress => "game_not_in_progress",
            GameServiceError::NotPlayersTurn => "not_players_turn",
            GameServiceError::NotAPlayer => "not_a_player",
            GameServiceError::InvalidMove => "invalid_move",
            GameServiceError::InvalidWallPlacement => "invalid_wall_placement",
            GameServiceError::InvalidPlayers => "invalid_players",
            GameServiceError::InternalError(_) => "internal_error",
        }
    }

    /// Only infrastructure failures are worth resubmitting; rule violations
    /// will fail again.
    pub fn is_transient(&self) -> bool {
        matches!(self, GameServiceError::InternalError(_))
    }
}

impl std::fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameServiceError::GameNotFound => write!(f, "Game not found"),
            GameServiceError::GameNotInProgress => write!(f, "Game is not in progress"),
            GameServiceError::NotPlayersTurn => write!(f, "Not your turn"),
            GameServiceError::NotAPlayer => write!(f, "Not a player in this game"),
            GameServiceError::InvalidMove => write!(f, "Invalid move"),
            GameServiceError::InvalidWallPlacement => write!(f, "Invalid wall placement"),
            GameServiceError::InvalidPlayers => {
                write!(f, "A game needs two distinct players")
            }
            GameServiceError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for GameServiceError {}

impl From<GameRepositoryError> for GameServiceError {
    fn from(err: GameRepositoryError) -> Self {
        GameServiceError::InternalError(err.to_string())
    }
}
