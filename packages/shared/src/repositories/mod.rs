pub mod errors;
pub mod game_repository;
pub mod in_memory_game_repository;
pub mod queue_repository;
pub mod websocket_repository;
