use lambda_runtime::Error;
use serde_json::Value;
use tracing::{error, info};

use super::status;
use crate::state::AppState;

/// Forgets the connection and takes its player out of the waiting queue.
pub async fn handle_disconnect(connection_id: &str, state: AppState) -> Result<Value, Error> {
    match state
        .websocket_service
        .remove_connection_by_id(connection_id)
        .await
    {
        Ok(Some(player_id)) => {
            info!("Player {} disconnected from {}", player_id, connection_id);
            if let Err(e) = state.queue_repository.leave_queue(&player_id).await {
                error!("Failed to remove player {} from queue: {}", player_id, e);
            }
        }
        Ok(None) => info!("Unknown connection {} disconnected", connection_id),
        Err(e) => error!("Failed to remove connection {}: {}", connection_id, e),
    }

    Ok(status(200))
}
