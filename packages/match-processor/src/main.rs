use lambda_runtime::{run, service_fn, Error};
use std::sync::Arc;

mod processor;
use processor::MatchProcessor;
use shared::{
    config::AppConfig,
    repositories::{
        game_repository::DynamoDbGameRepository,
        websocket_repository::DynamoDbWebSocketRepository,
    },
    services::{
        game_engine::QuoridorEngine, game_service::GameService,
        websocket_service::WebSocketService,
    },
};

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

    let game_repository = Arc::new(DynamoDbGameRepository::new(
        client.clone(),
        &app_config.games_table,
    ));
    let game_service = GameService::from_config(
        Arc::new(QuoridorEngine::with_config(app_config.engine)),
        game_repository,
        &app_config,
    );

    let websocket_repository = Arc::new(DynamoDbWebSocketRepository::new(
        client,
        &sdk_config,
        &app_config.connections_table,
        app_config.websocket_api_endpoint.as_deref(),
    ));
    let websocket_service = WebSocketService::new(websocket_repository);

    let processor = MatchProcessor::new(game_service, websocket_service);

    run(service_fn(
        move |event: lambda_runtime::LambdaEvent<aws_lambda_events::event::dynamodb::Event>| {
            let processor = processor.clone();
            async move { processor.process_event(event.payload).await }
        },
    ))
    .await
}
