use aws_lambda_events::apigw::ApiGatewayWebsocketProxyRequest;
use lambda_runtime::Error;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use super::{connection_id, status};
use crate::state::AppState;

pub async fn handle_connect(
    event: &ApiGatewayWebsocketProxyRequest,
    state: AppState,
) -> Result<Value, Error> {
    let connection_id = connection_id(event);

    let Some(player_id) = event
        .query_string_parameters
        .first("player_id")
        .filter(|player_id| !player_id.is_empty())
    else {
        warn!("Connection {} opened without a player_id", connection_id);
        return Ok(json!({
            "statusCode": 400,
            "body": json!({"error": "Missing player_id"}).to_string()
        }));
    };

    if let Err(e) = state
        .websocket_service
        .store_connection(player_id, connection_id)
        .await
    {
        error!("Failed to store connection {}: {}", connection_id, e);
        return Ok(json!({
            "statusCode": 500,
            "body": json!({"error": "Failed to store connection"}).to_string()
        }));
    }

    info!("Player {} connected on {}", player_id, connection_id);
    Ok(status(200))
}
