//! Creating, joining and starting games; roster connectivity.

use bluff_backend::db::require_db;
use bluff_backend::domain::GameStatus;
use bluff_backend::errors::ErrorCode;
use bluff_backend::repos::players;
use bluff_backend::services::games::GameService;

use crate::support::game_setup::{setup_playing_game, setup_waiting_game};
use crate::support::test_state::test_state;

#[tokio::test]
async fn test_create_game_seats_host_as_leader() {
    let state = test_state().await;
    let created = GameService::new()
        .create_game(&state, "  Alice  ", 5, 6)
        .await
        .unwrap();

    assert_eq!(created.game.status, GameStatus::Waiting);
    assert_eq!(created.game.round_count, 5);
    assert_eq!(created.game.max_players, 6);
    assert_eq!(created.game.current_round, 0);
    assert_eq!(created.game.join_code.len(), 6);
    assert_eq!(created.game.host_player_id, Some(created.player.id));
    assert_eq!(created.game.leader_player_id, Some(created.player.id));
    assert_eq!(created.player.display_name, "Alice");
    assert!(created.player.is_connected);
    assert!(created.player.connected_since.is_some());
}

#[tokio::test]
async fn test_create_game_rejects_out_of_range_config() {
    let state = test_state().await;
    let games = GameService::new();
    for (rounds, max_players) in [(0, 4), (51, 4), (3, 1), (3, 17)] {
        let err = games
            .create_game(&state, "Host", rounds, max_players)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidGameConfig, "{rounds}/{max_players}");
    }
    let err = games.create_game(&state, "   ", 3, 4).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidDisplayName);
}

#[tokio::test]
async fn test_join_accepts_sloppy_code_and_rejects_duplicates() {
    let state = test_state().await;
    let games = GameService::new();
    let created = games.create_game(&state, "Alice", 3, 3).await.unwrap();
    let code = created.game.join_code.to_lowercase();
    let sloppy = format!("{}-{}", &code[..3], &code[3..]);

    let bob = games.join_game(&state, &sloppy, "Bob").await.unwrap();
    assert_eq!(bob.game.id, created.game.id);
    assert!(bob.player.is_connected);

    let err = games.join_game(&state, &sloppy, "  bob ").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::DisplayNameTaken);

    games.join_game(&state, &sloppy, "Carol").await.unwrap();
    let err = games.join_game(&state, &sloppy, "Dave").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameFull);

    let err = games.join_game(&state, "ZZZZZZ", "Eve").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);
}

#[tokio::test]
async fn test_disconnected_player_still_holds_a_seat() {
    let state = test_state().await;
    let games = GameService::new();
    let created = games.create_game(&state, "Alice", 3, 2).await.unwrap();
    let code = created.game.join_code.clone();

    let bob = games.join_game(&state, &code, "Bob").await.unwrap();
    games.mark_disconnected(&state, bob.player.id).await.unwrap();

    let err = games.join_game(&state, &code, "Carol").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameFull);

    // the seat is still Bob's to come back to
    let change = games.mark_connected(&state, bob.player.id).await.unwrap();
    assert!(change.player.is_connected);
}

#[tokio::test]
async fn test_join_refused_once_playing() {
    let state = test_state().await;
    let game = setup_playing_game(&state, 2, 2).await;
    let err = GameService::new()
        .join_game(&state, &game.join_code, "Latecomer")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch);
}

#[tokio::test]
async fn test_start_game_rules() {
    let state = test_state().await;
    let games = GameService::new();

    let solo = setup_waiting_game(&state, 1, 2).await;
    let err = games.start_game(&state, solo.game_id, solo.host()).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InsufficientQuorum);

    let pair = setup_waiting_game(&state, 2, 2).await;
    let err = games
        .start_game(&state, pair.game_id, pair.player(1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotLeader);

    let started = games.start_game(&state, pair.game_id, pair.host()).await.unwrap();
    assert_eq!(started.status, GameStatus::Playing);
    assert_eq!(started.current_round, 1);

    let err = games.start_game(&state, pair.game_id, pair.host()).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch);
}

#[tokio::test]
async fn test_reconnect_resets_connected_since() {
    let state = test_state().await;
    let game = setup_waiting_game(&state, 2, 2).await;
    let games = GameService::new();
    let db = require_db(&state).unwrap();
    let before = players::require_player(db, game.player(1)).await.unwrap();

    let gone = games.mark_disconnected(&state, game.player(1)).await.unwrap();
    assert!(!gone.player.is_connected);
    assert_eq!(gone.player.connected_since, None);

    let back = games.mark_connected(&state, game.player(1)).await.unwrap();
    assert!(back.player.is_connected);
    let since = back.player.connected_since.expect("connected_since set");
    assert!(since >= before.connected_since.expect("joined connected"));

    // already connected: nothing changes
    let again = games.mark_connected(&state, game.player(1)).await.unwrap();
    assert_eq!(again.player.connected_since, back.player.connected_since);
}
