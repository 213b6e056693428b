use aws_lambda_events::apigw::ApiGatewayWebsocketProxyRequest;
use lambda_runtime::Error;
use serde_json::Value;

use shared::models::game::requests::GameRequest;

use super::{caller, connection_id, parse_body, publish, reject, BAD_REQUEST, UNREGISTERED};
use crate::state::AppState;

pub async fn handle_resign(
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

    let result = state.game_service.resign(&request.game_id, &player_id).await;
    publish(&state, &player_id, result).await
}
