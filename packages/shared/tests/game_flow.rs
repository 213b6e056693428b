use std::sync::Arc;

use shared::models::game::{Direction, EndReason, Game, GameStatus, MoveType, Position, Wall};
use shared::repositories::game_repository::GameRepository;
use shared::repositories::in_memory_game_repository::InMemoryGameRepository;
use shared::services::errors::game_service_errors::GameServiceError;
use shared::services::game_engine::QuoridorEngine;
use shared::services::game_service::GameService;

fn setup() -> (GameService, Arc<InMemoryGameRepository>) {
    let repository = Arc::new(InMemoryGameRepository::new());
    let service = GameService::new(Arc::new(QuoridorEngine::new()), repository.clone());
    (service, repository)
}

fn horizontal(x1: i32, y1: i32, x2: i32, y2: i32) -> Wall {
    Wall::new(
        Direction::Horizontal,
        Position::new(x1, y1),
        Position::new(x2, y2),
    )
}

fn vertical(x1: i32, y1: i32, x2: i32, y2: i32) -> Wall {
    Wall::new(
        Direction::Vertical,
        Position::new(x1, y1),
        Position::new(x2, y2),
    )
}

async fn stored(repository: &InMemoryGameRepository, game_id: &str) -> Game {
    repository
        .get_game_by_id(game_id)
        .await
        .unwrap()
        .expect("game should be stored")
}

#[tokio::test]
async fn test_player_one_walks_to_the_far_row_and_wins() {
    let (service, repository) = setup();
    let game = service.create_game("alice", "bob").await.unwrap();
    let game_id = game.game_id.clone();

    let bob_shuffle = [3, 2, 3, 2, 3, 2, 3];
    for y in 1..=8 {
        let game = service
            .make_move(&game_id, "alice", Position::new(4, y))
            .await
            .unwrap();
        assert_eq!(game.player_1.position, Position::new(4, y));

        if y < 8 {
            assert_eq!(game.turn, "bob");
            let x = bob_shuffle[(y - 1) as usize];
            let game = service
                .make_move(&game_id, "bob", Position::new(x, 8))
                .await
                .unwrap();
            assert_eq!(game.turn, "alice");
        }
    }

    let game = stored(&repository, &game_id).await;
    assert_eq!(game.status, GameStatus::Completed);
    assert_eq!(game.winner.as_deref(), Some("alice"));
    assert_eq!(game.end_reason, Some(EndReason::Win));
    assert_eq!(game.turn, "alice");
    assert_eq!(game.moves.len(), 15);
    assert_eq!(game.version, 15);
    assert!(game.completed_at.is_some());

    assert_eq!(
        service
            .make_move(&game_id, "alice", Position::new(4, 7))
            .await
            .unwrap_err(),
        GameServiceError::GameNotInProgress
    );
    assert_eq!(
        service.resign(&game_id, "bob").await.unwrap_err(),
        GameServiceError::GameNotInProgress
    );
    assert_eq!(
        service.reconnect(&game_id, "bob").await.unwrap_err(),
        GameServiceError::GameNotInProgress
    );
    assert!(service
        .get_active_game_by_user_id("alice")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_walls_alternate_turns_and_reject_overlaps() {
    let (service, repository) = setup();
    let game = service.create_game("alice", "bob").await.unwrap();
    let game_id = game.game_id.clone();
    let wall = horizontal(2, 2, 2, 3);

    let game = service.place_wall(&game_id, "alice", wall).await.unwrap();
    assert_eq!(game.player_1.walls, 9);
    assert_eq!(game.turn, "bob");
    assert_eq!(game.moves[0].move_type, MoveType::PlaceWall);

    let err = service.place_wall(&game_id, "bob", wall).await.unwrap_err();
    assert_eq!(err, GameServiceError::InvalidWallPlacement);

    let err = service
        .place_wall(&game_id, "bob", horizontal(3, 2, 3, 3))
        .await
        .unwrap_err();
    assert_eq!(err, GameServiceError::InvalidWallPlacement);

    let game = stored(&repository, &game_id).await;
    assert_eq!(game.walls, vec![wall]);
    assert_eq!(game.player_2.walls, 10);
    assert_eq!(game.turn, "bob");
    assert_eq!(game.version, 1);

    let game = service
        .place_wall(&game_id, "bob", vertical(5, 5, 6, 5))
        .await
        .unwrap();
    assert_eq!(game.player_2.walls, 9);
    assert_eq!(game.walls.len(), 2);
    assert_eq!(game.turn, "alice");
}

#[tokio::test]
async fn test_rejected_actions_leave_the_game_untouched() {
    let (service, repository) = setup();
    let game = service.create_game("alice", "bob").await.unwrap();
    let game_id = game.game_id.clone();

    assert_eq!(
        service
            .make_move(&game_id, "bob", Position::new(4, 7))
            .await
            .unwrap_err(),
        GameServiceError::NotPlayersTurn
    );
    assert_eq!(
        service
            .make_move(&game_id, "alice", Position::new(4, 2))
            .await
            .unwrap_err(),
        GameServiceError::InvalidMove
    );
    assert_eq!(
        service
            .make_move(&game_id, "mallory", Position::new(4, 1))
            .await
            .unwrap_err(),
        GameServiceError::NotPlayersTurn
    );
    assert_eq!(
        service.resign(&game_id, "mallory").await.unwrap_err(),
        GameServiceError::NotAPlayer
    );
    assert_eq!(
        service
            .make_move("missing", "alice", Position::new(4, 1))
            .await
            .unwrap_err(),
        GameServiceError::GameNotFound
    );

    assert_eq!(stored(&repository, &game_id).await, game);
}

#[tokio::test]
async fn test_sealing_wall_is_rejected() {
    let (service, repository) = setup();
    let mut game = Game::new("alice", "bob");
    // Row 0 is closed except for a corridor up column 0 into (0,1) and (0,2).
    game.walls = vec![
        horizontal(1, 0, 1, 1),
        horizontal(3, 0, 3, 1),
        horizontal(5, 0, 5, 1),
        horizontal(7, 0, 7, 1),
        vertical(0, 1, 1, 1),
    ];
    repository.save_game(&game).await.unwrap();

    let err = service
        .place_wall(&game.game_id, "alice", horizontal(0, 2, 0, 3))
        .await
        .unwrap_err();

    assert_eq!(err, GameServiceError::InvalidWallPlacement);
    assert_eq!(stored(&repository, &game.game_id).await, game);
}

#[tokio::test]
async fn test_wall_budget_runs_out() {
    let (service, repository) = setup();
    let mut game = Game::new("alice", "bob");
    game.player_1.walls = 0;
    repository.save_game(&game).await.unwrap();

    let err = service
        .place_wall(&game.game_id, "alice", horizontal(2, 2, 2, 3))
        .await
        .unwrap_err();

    assert_eq!(err, GameServiceError::InvalidWallPlacement);
    assert!(stored(&repository, &game.game_id).await.walls.is_empty());
}

#[tokio::test]
async fn test_resign_off_turn_and_reconnect() -> anyhow::Result<()> {
    let (service, _) = setup();
    let game = service.create_game("alice", "bob").await?;

    let reconnected = service.reconnect(&game.game_id, "bob").await?;
    assert_eq!(reconnected, game);

    let active = service.get_active_game_by_user_id("bob").await?;
    assert_eq!(active.map(|g| g.game_id), Some(game.game_id.clone()));

    let game = service.resign(&game.game_id, "bob").await?;
    assert_eq!(game.status, GameStatus::Completed);
    assert_eq!(game.end_reason, Some(EndReason::Resign));
    assert_eq!(game.winner.as_deref(), Some("alice"));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_moves_apply_once() {
    let (service, repository) = setup();
    let game = service.create_game("alice", "bob").await.unwrap();

    let (first, second) = tokio::join!(
        service.make_move(&game.game_id, "alice", Position::new(4, 1)),
        service.make_move(&game.game_id, "alice", Position::new(3, 0)),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|result| result.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|result| result == &Err(GameServiceError::NotPlayersTurn)));

    let stored = stored(&repository, &game.game_id).await;
    assert_eq!(stored.version, 1);
    assert_eq!(stored.moves.len(), 1);
    assert_eq!(stored.turn, "bob");
}
