pub mod errors;
pub mod game_engine;
pub mod game_service;
pub mod geometry;
pub mod websocket_service;
