use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_lambda_events::apigw::ApiGatewayWebsocketProxyRequest;
use serde_json::Value;

use shared::models::queue::QueueUser;
use shared::repositories::errors::queue_repository_errors::QueueRepositoryError;
use shared::repositories::in_memory_game_repository::InMemoryGameRepository;
use shared::repositories::queue_repository::QueueRepository;
use shared::repositories::websocket_repository::WebSocketRepository;
use shared::services::game_engine::QuoridorEngine;
use shared::services::game_service::GameService;
use shared::services::websocket_service::WebSocketService;

use crate::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Default)]
pub struct FakeConnections {
    connections: Mutex<HashMap<String, String>>,
    sent: Mutex<Vec<(String, String)>>,
}

impl FakeConnections {
    pub fn frames(&self, connection_id: &str) -> Vec<Value> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == connection_id)
            .map(|(_, message)| serde_json::from_str(message).unwrap())
            .collect()
    }

    pub fn player_for(&self, connection_id: &str) -> Option<String> {
        self.connections
            .lock()
            .unwrap()
            .iter()
            .find(|(_, id)| id.as_str() == connection_id)
            .map(|(player_id, _)| player_id.clone())
    }
}

#[async_trait]
impl WebSocketRepository for FakeConnections {
    async fn store_connection(&self, player_id: &str, connection_id: &str) -> Result<(), BoxError> {
        self.connections
            .lock()
            .unwrap()
            .insert(player_id.to_string(), connection_id.to_string());
        Ok(())
    }

    async fn remove_connection_by_id(&self, connection_id: &str) -> Result<Option<String>, BoxError> {
        let player_id = self.player_for(connection_id);
        if let Some(player_id) = &player_id {
            self.connections.lock().unwrap().remove(player_id);
        }
        Ok(player_id)
    }

    async fn get_connection_id(&self, player_id: &str) -> Result<Option<String>, BoxError> {
        Ok(self.connections.lock().unwrap().get(player_id).cloned())
    }

    async fn get_player_id(&self, connection_id: &str) -> Result<Option<String>, BoxError> {
        Ok(self.player_for(connection_id))
    }

    async fn send_message(&self, connection_id: &str, message: &str) -> Result<(), BoxError> {
        self.sent
            .lock()
            .unwrap()
            .push((connection_id.to_string(), message.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeQueue {
    pub waiting: Mutex<Vec<String>>,
}

#[async_trait]
impl QueueRepository for FakeQueue {
    async fn join_queue(&self, user: &QueueUser) -> Result<(), QueueRepositoryError> {
        self.waiting.lock().unwrap().push(user.player_id.clone());
        Ok(())
    }

    async fn leave_queue(&self, player_id: &str) -> Result<(), QueueRepositoryError> {
        self.waiting.lock().unwrap().retain(|id| id != player_id);
        Ok(())
    }
}

pub struct Harness {
    pub state: AppState,
    pub connections: Arc<FakeConnections>,
    pub queue: Arc<FakeQueue>,
    pub games: Arc<InMemoryGameRepository>,
}

impl Harness {
    pub async fn with_players(players: &[(&str, &str)]) -> Self {
        let connections = Arc::new(FakeConnections::default());
        for (player_id, connection_id) in players {
            connections
                .store_connection(player_id, connection_id)
                .await
                .unwrap();
        }
        let queue = Arc::new(FakeQueue::default());
        let games = Arc::new(InMemoryGameRepository::new());

        let state = AppState {
            websocket_service: Arc::new(WebSocketService::new(connections.clone())),
            game_service: Arc::new(GameService::new(
                Arc::new(QuoridorEngine::new()),
                games.clone(),
            )),
            queue_repository: queue.clone(),
        };

        Harness {
            state,
            connections,
            queue,
            games,
        }
    }
}

pub fn event(connection_id: &str, body: Option<&str>) -> ApiGatewayWebsocketProxyRequest {
    let mut event = ApiGatewayWebsocketProxyRequest::default();
    event.request_context.connection_id = Some(connection_id.to_string());
    event.body = body.map(str::to_string);
    event
}
