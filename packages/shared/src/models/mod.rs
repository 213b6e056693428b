pub mod game;
pub mod matchmaking;
pub mod queue;
