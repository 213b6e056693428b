use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::game::{Game, GameStatus};
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::game_repository::GameRepository;

/// Process-local game store with the same conditional-write rules as the
/// DynamoDB store. Used by tests and local runs.
#[derive(Default)]
pub struct InMemoryGameRepository {
    games: RwLock<HashMap<String, Game>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn save_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let mut games = self.games.write().await;

        let expected = match games.get(&game.game_id) {
            None if game.version == 0 => true,
            Some(stored) if game.version > 0 => stored.version == game.version - 1,
            _ => false,
        };
        if !expected {
            return Err(GameRepositoryError::VersionConflict);
        }

        games.insert(game.game_id.clone(), game.clone());
        Ok(())
    }

    async fn get_game_by_id(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        Ok(self.games.read().await.get(game_id).cloned())
    }

    async fn get_games_by_user_and_status(
        &self,
        user_id: &str,
        status: GameStatus,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let games = self.games.read().await;
        Ok(games
            .values()
            .filter(|game| game.status == status && game.is_player(user_id))
            .cloned()
            .collect())
    }
}
