use aws_lambda_events::apigw::ApiGatewayWebsocketProxyRequest;
use lambda_runtime::Error;
use serde_json::Value;
use tracing::{error, info};

use shared::models::game::responses::GameResponse;
use shared::models::queue::QueueUser;

use super::{caller, connection_id, reject, status, BAD_REQUEST, UNREGISTERED};
use crate::state::AppState;

/// Resumes the player's running game, or puts them in the matchmaking queue.
pub async fn handle_start_game(
    event: &ApiGatewayWebsocketProxyRequest,
    state: AppState,
) -> Result<Value, Error> {
    let connection_id = connection_id(event);
    let Some(player_id) = caller(event, &state).await? else {
        return reject(&state, connection_id, BAD_REQUEST, UNREGISTERED).await;
    };

    match state.game_service.get_active_game_by_user_id(&player_id).await {
        Ok(Some(game)) => {
            info!(
                "Player {} already plays game_id={}, resending state",
                player_id, game.game_id
            );
            let frame = serde_json::to_string(&GameResponse::game_state(&game))?;
            state
                .websocket_service
                .send_message(connection_id, &frame)
                .await?;
            Ok(status(200))
        }
        Ok(None) => {
            state
                .queue_repository
                .join_queue(&QueueUser::new(&player_id))
                .await?;
            info!("Player {} joined the queue", player_id);
            state.websocket_service.send_queued(&player_id).await?;
            Ok(status(200))
        }
        Err(e) => {
            error!("Failed to look up active game for {}: {}", player_id, e);
            state.websocket_service.send_error(&player_id, &e).await?;
            Ok(status(500))
        }
    }
}
