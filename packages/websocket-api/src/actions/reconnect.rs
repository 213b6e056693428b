use aws_lambda_events::apigw::ApiGatewayWebsocketProxyRequest;
use lambda_runtime::Error;
use serde_json::Value;
use tracing::info;

use shared::models::game::requests::GameRequest;
use shared::models::game::responses::GameResponse;

use super::{caller, connection_id, parse_body, reject, status, BAD_REQUEST, UNREGISTERED};
use crate::state::AppState;

/// Sends the current game back to the reconnecting player only.
pub async fn handle_reconnect(
    event: &ApiGatewayWebsocketProxyRequest,
    state: AppState,
) -> Result<Value, Error> {
    let connection_id = connection_id(event);
    let Some(player_id) = caller(event, &state).await? else {
        return reject(&state, connection_id, BAD_REQUEST, UNREGISTERED).await;
    };

    let request: GameRequest = match parse_body(event) {
        Ok(request) => request,
        Err(message) => return reject(&state, connection_id, BAD_REQUEST, &message).await,
    };

    match state
        .game_service
        .reconnect(&request.game_id, &player_id)
        .await
    {
        Ok(game) => {
            info!("Player {} reconnected to game_id={}", player_id, game.game_id);
            let frame = serde_json::to_string(&GameResponse::game_state(&game))?;
            state
                .websocket_service
                .send_message(connection_id, &frame)
                .await?;
            Ok(status(200))
        }
        Err(e) => reject(&state, connection_id, e.code(), &e.to_string()).await,
    }
}
