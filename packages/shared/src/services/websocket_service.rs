use std::sync::Arc;
use tracing::{info, warn};

use crate::models::game::responses::GameResponse;
use crate::models::game::Game;
use crate::repositories::websocket_repository::WebSocketRepository;
use crate::services::errors::game_service_errors::GameServiceError;

#[derive(Clone)]
pub struct WebSocketService {
    repository: Arc<dyn WebSocketRepository>,
}

impl WebSocketService {
    pub fn new(repository: Arc<dyn WebSocketRepository>) -> Self {
        Self { repository }
    }

    pub async fn store_connection(
        &self,
        player_id: &str,
        connection_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Storing WebSocket connection for player: {}", player_id);
        self.repository
            .store_connection(player_id, connection_id)
            .await
    }

    /// Returns the player the connection belonged to, if it was known.
    pub async fn remove_connection_by_id(
        &self,
        connection_id: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        info!("Removing WebSocket connection by ID: {}", connection_id);
        self.repository.remove_connection_by_id(connection_id).await
    }

    pub async fn get_connection_id(
        &self,
        player_id: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        self.repository.get_connection_id(player_id).await
    }

    pub async fn get_player_id(
        &self,
        connection_id: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        self.repository.get_player_id(connection_id).await
    }

    pub async fn send_notification(
        &self,
        player_id: &str,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(connection_id) = self.get_connection_id(player_id).await? {
            info!("Sending notification to player {}", player_id);
            self.repository
                .send_message(&connection_id, message)
                .await?;
        } else {
            info!(
                "Player {} is not connected, skipping notification",
                player_id
            );
        }
        Ok(())
    }

    pub async fn send_message(
        &self,
        connection_id: &str,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Sending message to connection: {}", connection_id);
        self.repository.send_message(connection_id, message).await
    }

    /// Pushes the full game to both players. A failed delivery to one player
    /// does not stop delivery to the other; the first failure is returned.
    pub async fn broadcast_game_state(
        &self,
        game: &Game,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let message = serde_json::to_string(&GameResponse::game_state(game))?;

        let mut first_error = None;
        for player_id in [&game.player_1.user_id, &game.player_2.user_id] {
            if let Err(e) = self.send_notification(player_id, &message).await {
                warn!(
                    "Failed to send game state of game_id={} to player {}. err={}",
                    game.game_id, player_id, e
                );
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub async fn send_error(
        &self,
        player_id: &str,
        error: &GameServiceError,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let message =
            serde_json::to_string(&GameResponse::error(error.code(), &error.to_string()))?;
        self.send_notification(player_id, &message).await
    }

    pub async fn send_queued(
        &self,
        player_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let message = serde_json::to_string(&GameResponse::queued(player_id))?;
        self.send_notification(player_id, &message).await
    }
}
