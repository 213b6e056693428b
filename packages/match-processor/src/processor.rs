use aws_lambda_events::event::dynamodb::Event;
use lambda_runtime::Error;
use serde_dynamo::from_item;
use shared::models::matchmaking::MatchFound;
use shared::services::errors::game_service_errors::GameServiceError;
use shared::services::game_service::GameService;
use shared::services::websocket_service::WebSocketService;
use tracing::{debug, error, info, warn};

/// Starts a game for every pairing the matchmaker inserts.
#[derive(Clone)]
pub struct MatchProcessor {
    game_service: GameService,
    websocket_service: WebSocketService,
}

impl MatchProcessor {
    pub fn new(game_service: GameService, websocket_service: WebSocketService) -> Self {
        Self {
            game_service,
            websocket_service,
        }
    }

    /// Records that cannot be turned into a game are logged and dropped.
    /// Store failures fail the batch so the stream delivers it again; games
    /// already started from it are picked up by match id on the replay.
    pub async fn process_event(&self, event: Event) -> Result<(), Error> {
        debug!(
            "Match processor received event with {} records",
            event.records.len()
        );

        let mut failed = 0;
        for record in event.records {
            let event_name = record.event_name.as_str();
            if event_name != "INSERT" {
                debug!("Skipping record with event_name: {}", event_name);
                continue;
            }

            let found: MatchFound = match from_item(record.change.new_image) {
                Ok(found) => found,
                Err(e) => {
                    error!("Failed to parse match record: {}", e);
                    continue;
                }
            };

            match self.start_match(&found).await {
                Ok(()) => {}
                Err(e) if e.is_transient() => {
                    error!("Failed to start match {}: {}", found.match_id, e);
                    failed += 1;
                }
                Err(e) => {
                    warn!("Dropping match {}: {}", found.match_id, e);
                }
            }
        }

        if failed > 0 {
            return Err(format!("{} match records could not be started", failed).into());
        }
        Ok(())
    }

    async fn start_match(&self, found: &MatchFound) -> Result<(), GameServiceError> {
        info!(
            "Starting match {} between {} and {}",
            found.match_id, found.player1_id, found.player2_id
        );

        let game = self
            .game_service
            .create_game_for_match(&found.match_id, &found.player1_id, &found.player2_id)
            .await?;

        if let Err(e) = self.websocket_service.broadcast_game_state(&game).await {
            warn!(
                "Game {} started but players were not notified: {}",
                game.game_id, e
            );
        }
        Ok(())
    }
}
