use aws_lambda_events::apigw::ApiGatewayWebsocketProxyRequest;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

mod actions;
mod state;
#[cfg(test)]
mod test_support;

use actions::{
    connect::handle_connect, default::handle_default_message, disconnect::handle_disconnect,
    make_move::handle_make_move, place_wall::handle_place_wall, reconnect::handle_reconnect,
    resign::handle_resign, start_game::handle_start_game,
};
use shared::config::AppConfig;
use shared::repositories::game_repository::DynamoDbGameRepository;
use shared::repositories::queue_repository::DynamoDbQueueRepository;
use shared::repositories::websocket_repository::DynamoDbWebSocketRepository;
use shared::services::game_engine::QuoridorEngine;
use shared::services::game_service::GameService;
use shared::services::websocket_service::WebSocketService;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let app_config = AppConfig::from_env()?;
    let sdk_config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&sdk_config);

    let websocket_repository = Arc::new(DynamoDbWebSocketRepository::new(
        client.clone(),
        &sdk_config,
        &app_config.connections_table,
        app_config.websocket_api_endpoint.as_deref(),
    ));
    let game_repository = Arc::new(DynamoDbGameRepository::new(
        client.clone(),
        &app_config.games_table,
    ));
    let queue_repository = Arc::new(DynamoDbQueueRepository::new(
        client,
        &app_config.matchmaking_table,
    ));
    let engine = Arc::new(QuoridorEngine::with_config(app_config.engine));

    let state = AppState {
        websocket_service: Arc::new(WebSocketService::new(websocket_repository)),
        game_service: Arc::new(GameService::from_config(
            engine,
            game_repository,
            &app_config,
        )),
        queue_repository,
    };

    run(service_fn(|event: LambdaEvent<ApiGatewayWebsocketProxyRequest>| {
        websocket_handler(event, state.clone())
    }))
    .await
}

async fn websocket_handler(
    event: LambdaEvent<ApiGatewayWebsocketProxyRequest>,
    state: AppState,
) -> Result<Value, Error> {
    let request = event.payload;
    let route_key = request
        .request_context
        .route_key
        .as_deref()
        .unwrap_or("$default");
    let connection_id = actions::connection_id(&request);

    info!(
        "Processing route_key: {}, connection_id: {}",
        route_key, connection_id
    );
    debug!("Request body: {:?}", request.body);

    match route_key {
        "$connect" => handle_connect(&request, state).await,
        "$disconnect" => handle_disconnect(connection_id, state).await,
        "start_game" => handle_start_game(&request, state).await,
        "make_move" => handle_make_move(&request, state).await,
        "place_wall" => handle_place_wall(&request, state).await,
        "resign" => handle_resign(&request, state).await,
        "reconnect" => handle_reconnect(&request, state).await,
        _ => handle_default_message(&request, state).await,
    }
}
