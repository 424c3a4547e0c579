//! The quorum is frozen when a round opens; roster changes never move it.

use bluff_backend::db::require_db;
use bluff_backend::domain::RoundStatus;
use bluff_backend::errors::ErrorCode;
use bluff_backend::repos::rounds;
use bluff_backend::services::games::GameService;
use bluff_backend::services::round_flow::{PhaseOutcome, RoundFlowService};

use crate::support::game_setup::{create_question, open_round, setup_answering_round, setup_playing_game};
use crate::support::test_state::test_state;

#[tokio::test]
async fn test_disconnect_mid_round_does_not_lower_quorum() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 3, 2).await;
    assert_eq!(round.required_players, 3);
    let flow = RoundFlowService::from_state(&state);

    GameService::new()
        .mark_disconnected(&state, game.player(2))
        .await
        .unwrap();

    for (idx, text) in [(0, "Lyon"), (1, "Nice")] {
        let receipt = flow
            .submit_answer(&state, round.id, game.player(idx), text.into())
            .await
            .unwrap();
        assert_eq!(receipt.phase, PhaseOutcome::Unchanged);
    }

    let db = require_db(&state).unwrap();
    let stored = rounds::require_round(db, round.id).await.unwrap();
    assert_eq!(stored.status, RoundStatus::Answering);
    assert_eq!(stored.required_players, 3);

    // The disconnected player is still a member and can complete the quorum
    let last = flow
        .submit_answer(&state, round.id, game.player(2), "Lille".into())
        .await
        .unwrap();
    assert_eq!(last.phase, PhaseOutcome::VotingOpened);
}

#[tokio::test]
async fn test_reconnect_mid_round_does_not_raise_quorum() {
    let state = test_state().await;
    let game = setup_playing_game(&state, 3, 2).await;
    let games = GameService::new();
    games.mark_disconnected(&state, game.player(2)).await.unwrap();

    let round = open_round(&state, &game).await;
    assert_eq!(round.required_players, 2);

    games.mark_connected(&state, game.player(2)).await.unwrap();
    let flow = RoundFlowService::from_state(&state);
    flow.submit_answer(&state, round.id, game.player(0), "Lyon".into())
        .await
        .unwrap();
    let second = flow
        .submit_answer(&state, round.id, game.player(1), "Nice".into())
        .await
        .unwrap();
    assert_eq!(second.phase, PhaseOutcome::VotingOpened);
}

#[tokio::test]
async fn test_round_refused_below_minimum_quorum() {
    let state = test_state().await;
    let game = setup_playing_game(&state, 2, 2).await;
    GameService::new()
        .mark_disconnected(&state, game.player(1))
        .await
        .unwrap();
    let question_id = create_question(&state).await;

    let err = RoundFlowService::from_state(&state)
        .open_round(&state, game.game_id, game.host(), question_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InsufficientQuorum);

    let db = require_db(&state).unwrap();
    assert!(rounds::list_by_game(db, game.game_id).await.unwrap().is_empty());
}
