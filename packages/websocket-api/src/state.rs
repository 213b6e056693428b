use std::sync::Arc;

use shared::repositories::queue_repository::QueueRepository;
use shared::services::game_service::GameService;
use shared::services::websocket_service::WebSocketService;

#[derive(Clone)]
pub struct AppState {
    pub websocket_service: Arc<WebSocketService>,
    pub game_service: Arc<GameService>,
    pub queue_repository: Arc<dyn QueueRepository>,
}
