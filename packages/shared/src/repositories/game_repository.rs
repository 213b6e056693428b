use crate::models::game::{Game, GameStatus};
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Durable store for games.
///
/// `save_game` is a conditional write: a game with `version == 0` must not
/// exist yet, any other game is only written when the stored copy still has
/// `version - 1`. A lost race is reported as
/// [`GameRepositoryError::VersionConflict`] and nothing is written.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn save_game(&self, game: &Game) -> Result<(), GameRepositoryError>;

    async fn get_game_by_id(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError>;

    async fn get_games_by_user_and_status(
        &self,
        user_id: &str,
        status: GameStatus,
    ) -> Result<Vec<Game>, GameRepositoryError>;
}

pub struct DynamoDbGameRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbGameRepository {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl GameRepository for DynamoDbGameRepository {
    async fn save_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let item = to_item(game).map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;

        let request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item));

        let request = if game.version == 0 {
            request.condition_expression("attribute_not_exists(game_id)")
        } else {
            request
                .condition_expression("version = :expected_version")
                .expression_attribute_values(
                    ":expected_version",
                    AttributeValue::N((game.version - 1).to_string()),
                )
        };

        request.send().await.map_err(|e| {
            let service_error = e.into_service_error();
            if service_error.is_conditional_check_failed_exception() {
                GameRepositoryError::VersionConflict
            } else {
                GameRepositoryError::DynamoDb(service_error.to_string())
            }
        })?;

        debug!("Saved game {} at version {}", game.game_id, game.version);
        Ok(())
    }

    async fn get_game_by_id(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("game_id", AttributeValue::S(game_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            let game: Game = from_item(item)
                .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(game))
        } else {
            Ok(None)
        }
    }

    async fn get_games_by_user_and_status(
        &self,
        user_id: &str,
        status: GameStatus,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let status_value: AttributeValue = to_attribute_value(status)
            .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;

        let mut games = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression(
                    "(player_1.user_id = :user_id OR player_2.user_id = :user_id) AND #status = :status",
                )
                .expression_attribute_names("#status", "status")
                .expression_attribute_values(":user_id", AttributeValue::S(user_id.to_string()))
                .expression_attribute_values(":status", status_value.clone())
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

            for item in output.items.unwrap_or_default() {
                let game: Game = from_item(item)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
                games.push(game);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!(
            "Found {} games for user {} with status {:?}",
            games.len(),
            user_id,
            status
        );
        Ok(games)
    }
}
