use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{AppConfig, DEFAULT_MAX_CONFLICT_RETRIES, DEFAULT_STORE_TIMEOUT_MS};
use crate::models::game::{EndReason, Game, GameStatus, Move, Position, Wall};
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::game_repository::GameRepository;
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::game_engine::GameEngine;

/// Runs the match state machine: every action is loaded, checked, applied to
/// a local copy and written back with a version check.
#[derive(Clone)]
pub struct GameService {
    engine: Arc<dyn GameEngine>,
    repository: Arc<dyn GameRepository>,
    store_timeout: Duration,
    max_conflict_retries: u32,
}

impl GameService {
    pub fn new(engine: Arc<dyn GameEngine>, repository: Arc<dyn GameRepository>) -> Self {
        GameService {
            engine,
            repository,
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }

    pub fn from_config(
        engine: Arc<dyn GameEngine>,
        repository: Arc<dyn GameRepository>,
        config: &AppConfig,
    ) -> Self {
        GameService::new(engine, repository)
            .with_store_timeout(config.store_timeout)
            .with_max_conflict_retries(config.max_conflict_retries)
    }

    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    pub fn with_max_conflict_retries(mut self, max_conflict_retries: u32) -> Self {
        self.max_conflict_retries = max_conflict_retries;
        self
    }

    pub async fn create_game(&self, user1_id: &str, user2_id: &str) -> Result<Game, GameServiceError> {
        info!("CreateGame: user1_id={}, user2_id={}", user1_id, user2_id);

        validate_players(user1_id, user2_id)?;
        let game = Game::new(user1_id, user2_id);
        self.with_deadline(self.repository.save_game(&game))
            .await
            .map_err(|e| {
                warn!("CreateGame: error while saving the game. err={}", e);
                GameServiceError::from(e)
            })?;

        info!(
            "CreateGame: created game with id={} for users {} and {}",
            game.game_id, user1_id, user2_id
        );
        Ok(game)
    }

    /// Like `create_game`, but the game takes the id of the pairing that
    /// produced it. Replaying the same pairing returns the game created the
    /// first time instead of starting a second one.
    pub async fn create_game_for_match(
        &self,
        match_id: &str,
        user1_id: &str,
        user2_id: &str,
    ) -> Result<Game, GameServiceError> {
        info!(
            "CreateGameForMatch: match_id={}, user1_id={}, user2_id={}",
            match_id, user1_id, user2_id
        );

        validate_players(user1_id, user2_id)?;
        let mut game = Game::new(user1_id, user2_id);
        game.game_id = match_id.to_string();

        match self.with_deadline(self.repository.save_game(&game)).await {
            Ok(()) => Ok(game),
            Err(GameRepositoryError::VersionConflict) => {
                info!("CreateGameForMatch: match_id={} already has a game", match_id);
                self.load_game(match_id).await
            }
            Err(e) => {
                warn!("CreateGameForMatch: error while saving the game. err={}", e);
                Err(e.into())
            }
        }
    }

    pub async fn get_game_by_id(&self, game_id: &str) -> Result<Game, GameServiceError> {
        debug!("GetGameById: game_id={}", game_id);
        self.load_game(game_id).await
    }

    /// The in-progress game `user_id` takes part in, if any.
    pub async fn get_active_game_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<Game>, GameServiceError> {
        debug!("GetActiveGameByUserId: user_id={}", user_id);

        let games = self
            .with_deadline(
                self.repository
                    .get_games_by_user_and_status(user_id, GameStatus::InProgress),
            )
            .await?;

        Ok(games.into_iter().max_by_key(|game| game.updated_at))
    }

    pub async fn make_move(
        &self,
        game_id: &str,
        user_id: &str,
        new_position: Position,
    ) -> Result<Game, GameServiceError> {
        info!(
            "MakeMove: game_id={}, user_id={}, new position={:?}",
            game_id, user_id, new_position
        );

        let engine = &self.engine;
        self.commit(game_id, "MakeMove", |game| {
            ensure_turn(game, user_id)?;

            if !engine.is_move_valid(game, user_id, &new_position) {
                warn!(
                    "MakeMove: invalid move by user_id={} in game_id={}. Move={:?}",
                    user_id, game_id, new_position
                );
                return Err(GameServiceError::InvalidMove);
            }

            let player = game.player_mut(user_id).ok_or(GameServiceError::NotAPlayer)?;
            player.position = new_position;
            let won = engine.check_win(player);
            game.moves.push(Move::step(user_id, new_position));

            if won {
                game.complete(user_id, EndReason::Win);
                info!("MakeMove: user_id={} has won game_id={}", user_id, game_id);
            } else {
                game.pass_turn();
            }
            Ok(())
        })
        .await
    }

    pub async fn place_wall(
        &self,
        game_id: &str,
        user_id: &str,
        wall: Wall,
    ) -> Result<Game, GameServiceError> {
        info!(
            "PlaceWall: game_id={}, user_id={}, wall={:?}",
            game_id, user_id, wall
        );

        let engine = &self.engine;
        self.commit(game_id, "PlaceWall", |game| {
            ensure_turn(game, user_id)?;

            let walls_left = game.player(user_id).map_or(0, |player| player.walls);
            if walls_left <= 0 {
                warn!(
                    "PlaceWall: user_id={} has no walls left in game_id={}",
                    user_id, game_id
                );
                return Err(GameServiceError::InvalidWallPlacement);
            }

            if !engine.is_wall_placement_valid(game, &wall) {
                warn!(
                    "PlaceWall: invalid wall placement by user_id={} in game_id={}. Wall={:?}",
                    user_id, game_id, wall
                );
                return Err(GameServiceError::InvalidWallPlacement);
            }

            let player = game.player_mut(user_id).ok_or(GameServiceError::NotAPlayer)?;
            player.walls -= 1;
            game.walls.push(wall);
            game.moves.push(Move::wall(user_id, wall));
            game.pass_turn();
            Ok(())
        })
        .await
    }

    /// Resigning does not need to wait for the player's turn.
    pub async fn resign(&self, game_id: &str, user_id: &str) -> Result<Game, GameServiceError> {
        info!("Resign: game_id={}, user_id={}", game_id, user_id);

        self.commit(game_id, "Resign", |game| {
            let winner_id = game
                .opponent(user_id)
                .map(|opponent| opponent.user_id.clone())
                .ok_or(GameServiceError::NotAPlayer)?;

            game.complete(&winner_id, EndReason::Resign);
            info!(
                "Resign: user_id={} resigned game_id={}, winner={}",
                user_id, game_id, winner_id
            );
            Ok(())
        })
        .await
    }

    pub async fn reconnect(&self, game_id: &str, user_id: &str) -> Result<Game, GameServiceError> {
        info!("Reconnect: game_id={}, user_id={}", game_id, user_id);

        let game = self.load_game(game_id).await?;

        if game.status != GameStatus::InProgress {
            warn!("Reconnect: game_id={} is not in progress", game_id);
            return Err(GameServiceError::GameNotInProgress);
        }

        if !game.is_player(user_id) {
            warn!("Reconnect: user_id={} is not a player in game_id={}", user_id, game_id);
            return Err(GameServiceError::NotAPlayer);
        }

        Ok(game)
    }

    async fn with_deadline<T, F>(&self, operation: F) -> Result<T, GameRepositoryError>
    where
        F: Future<Output = Result<T, GameRepositoryError>>,
    {
        tokio::time::timeout(self.store_timeout, operation)
            .await
            .map_err(|_| GameRepositoryError::Timeout)?
    }

    async fn load_game(&self, game_id: &str) -> Result<Game, GameServiceError> {
        let game = self
            .with_deadline(self.repository.get_game_by_id(game_id))
            .await
            .map_err(|e| {
                warn!("Error while fetching game_id={}. err={}", game_id, e);
                GameServiceError::from(e)
            })?;

        game.ok_or_else(|| {
            warn!("Game with id={} not found", game_id);
            GameServiceError::GameNotFound
        })
    }

    /// Load, check and apply `apply` to an in-progress game, then write it
    /// back. A concurrent write to the same game restarts the whole cycle so
    /// the action is validated against the state it will be applied to.
    async fn commit<F>(
        &self,
        game_id: &str,
        action: &str,
        mut apply: F,
    ) -> Result<Game, GameServiceError>
    where
        F: FnMut(&mut Game) -> Result<(), GameServiceError>,
    {
        let mut attempt = 0;

        loop {
            let mut game = self.load_game(game_id).await?;

            if game.status != GameStatus::InProgress {
                warn!("{}: game_id={} is not in progress", action, game_id);
                return Err(GameServiceError::GameNotInProgress);
            }

            apply(&mut game)?;
            game.version += 1;
            game.updated_at = chrono::Utc::now();

            match self.with_deadline(self.repository.save_game(&game)).await {
                Ok(()) => return Ok(game),
                Err(GameRepositoryError::VersionConflict) if attempt < self.max_conflict_retries => {
                    attempt += 1;
                    warn!(
                        "{}: game_id={} changed while applying the action, retry {}/{}",
                        action, game_id, attempt, self.max_conflict_retries
                    );
                }
                Err(e) => {
                    warn!(
                        "{}: error while saving game_id={}. err={}",
                        action, game_id, e
                    );
                    return Err(e.into());
                }
            }
        }
    }
}

fn validate_players(user1_id: &str, user2_id: &str) -> Result<(), GameServiceError> {
    if user1_id.is_empty() || user2_id.is_empty() || user1_id == user2_id {
        warn!(
            "Rejected players user1_id={:?}, user2_id={:?}",
            user1_id, user2_id
        );
        return Err(GameServiceError::InvalidPlayers);
    }
    Ok(())
}

fn ensure_turn(game: &Game, user_id: &str) -> Result<(), GameServiceError> {
    if game.turn != user_id {
        warn!(
            "It is not user_id={} turn in game_id={}",
            user_id, game.game_id
        );
        return Err(GameServiceError::NotPlayersTurn);
    }
    Ok(())
}
