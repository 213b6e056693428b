use aws_lambda_events::apigw::ApiGatewayWebsocketProxyRequest;
use lambda_runtime::Error;
use serde_json::Value;

use super::{connection_id, reject, BAD_REQUEST};
use crate::state::AppState;

pub async fn handle_default_message(
    event: &ApiGatewayWebsocketProxyRequest,
    state: AppState,
) -> Result<Value, Error> {
    reject(&state, connection_id(event), BAD_REQUEST, "Unknown action").await
}
