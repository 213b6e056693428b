use aws_lambda_events::apigw::ApiGatewayWebsocketProxyRequest;
use lambda_runtime::Error;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use shared::models::game::responses::GameResponse;
use shared::models::game::Game;
use shared::services::errors::game_service_errors::GameServiceError;

use crate::state::AppState;

pub mod connect;
pub mod default;
pub mod disconnect;
pub mod make_move;
pub mod place_wall;
pub mod reconnect;
pub mod resign;
pub mod start_game;

pub const BAD_REQUEST: &str = "bad_request";

pub(crate) fn connection_id(event: &ApiGatewayWebsocketProxyRequest) -> &str {
    event.request_context.connection_id.as_deref().unwrap_or("")
}

pub(crate) fn status(code: u16) -> Value {
    json!({ "statusCode": code })
}

pub(crate) fn parse_body<T: DeserializeOwned>(
    event: &ApiGatewayWebsocketProxyRequest,
) -> Result<T, String> {
    let body = event.body.as_deref().ok_or("Missing request body")?;
    serde_json::from_str(body).map_err(|e| format!("Invalid request body: {}", e))
}

/// Answers the calling connection directly with an error frame.
pub(crate) async fn reject(
    state: &AppState,
    connection_id: &str,
    code: &str,
    message: &str,
) -> Result<Value, Error> {
    warn!(
        "Rejecting request from connection {}: {} ({})",
        connection_id, message, code
    );
    let frame = serde_json::to_string(&GameResponse::error(code, message))?;

    if let Err(e) = state.websocket_service.send_message(connection_id, &frame).await {
        error!("Failed to send error to connection {}: {}", connection_id, e);
    }
    Ok(status(400))
}

pub(crate) const UNREGISTERED: &str = "Connection is not registered to a player";

/// The player registered for the calling connection at `$connect`.
pub(crate) async fn caller(
    event: &ApiGatewayWebsocketProxyRequest,
    state: &AppState,
) -> Result<Option<String>, Error> {
    state
        .websocket_service
        .get_player_id(connection_id(event))
        .await
}

/// Sends the outcome of a game transition: the new state to both players, or
/// the error to the player who acted.
pub(crate) async fn publish(
    state: &AppState,
    player_id: &str,
    result: Result<Game, GameServiceError>,
) -> Result<Value, Error> {
    match result {
        Ok(game) => {
            if let Err(e) = state.websocket_service.broadcast_game_state(&game).await {
                error!("Failed to broadcast game_id={}: {}", game.game_id, e);
            }
            info!("Published game_id={} version={}", game.game_id, game.version);
            Ok(status(200))
        }
        Err(e) => {
            if let Err(send_error) = state.websocket_service.send_error(player_id, &e).await {
                error!("Failed to send error to player {}: {}", player_id, send_error);
            }
            Ok(status(if e.is_transient() { 500 } else { 400 }))
        }
    }
}
