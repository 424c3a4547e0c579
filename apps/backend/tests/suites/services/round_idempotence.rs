//! Repeated evaluation and repeated expiry calls never change settled state.

use bluff_backend::db::require_db;
use bluff_backend::domain::{GameStatus, RoundStatus};
use bluff_backend::repos::{answers, games, players, rounds};
use bluff_backend::services::round_flow::{ForceAdvanceOutcome, PhaseOutcome, RoundFlowService};

use crate::support::game_setup::setup_answering_round;
use crate::support::test_state::test_state;

#[tokio::test]
async fn test_evaluate_below_quorum_is_a_no_op() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 3, 2).await;
    let flow = RoundFlowService::from_state(&state);

    flow.submit_answer(&state, round.id, game.player(0), "Lyon".into())
        .await
        .unwrap();
    let db = require_db(&state).unwrap();
    let before = rounds::require_round(db, round.id).await.unwrap();

    for _ in 0..3 {
        let outcome = flow.evaluate_round(&state, round.id).await.unwrap();
        assert_eq!(outcome, PhaseOutcome::Unchanged);
    }

    let stored = rounds::require_round(db, round.id).await.unwrap();
    assert_eq!(stored, before);
    assert_eq!(stored.status, RoundStatus::Answering);
    assert!(answers::find_correct(db, round.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_completed_round_ignores_further_calls() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 2, 3).await;
    let flow = RoundFlowService::from_state(&state);

    flow.force_advance(&state, round.id, None).await.unwrap();
    flow.force_advance(&state, round.id, None).await.unwrap();

    let db = require_db(&state).unwrap();
    let game_before = games::require_game(db, game.game_id).await.unwrap();
    let scores_before: Vec<i32> = players::list_by_game(db, game.game_id)
        .await
        .unwrap()
        .iter()
        .map(|p| p.score)
        .collect();

    for _ in 0..3 {
        assert_eq!(
            flow.force_advance(&state, round.id, None).await.unwrap(),
            ForceAdvanceOutcome::AlreadyCompleted
        );
        assert_eq!(
            flow.evaluate_round(&state, round.id).await.unwrap(),
            PhaseOutcome::Unchanged
        );
    }

    let game_after = games::require_game(db, game.game_id).await.unwrap();
    assert_eq!(game_after.current_round, game_before.current_round);
    assert_eq!(game_after.current_round, 2);
    assert_eq!(game_after.status, GameStatus::Playing);
    let scores_after: Vec<i32> = players::list_by_game(db, game.game_id)
        .await
        .unwrap()
        .iter()
        .map(|p| p.score)
        .collect();
    assert_eq!(scores_before, scores_after);
}

#[tokio::test]
async fn test_stale_expiry_for_answering_leaves_voting_alone() {
    let state = test_state().await;
    let (_game, round) = setup_answering_round(&state, 2, 2).await;
    let flow = RoundFlowService::from_state(&state);

    flow.force_advance(&state, round.id, Some(RoundStatus::Answering))
        .await
        .unwrap();
    let stale = flow
        .force_advance(&state, round.id, Some(RoundStatus::Answering))
        .await
        .unwrap();
    assert_eq!(
        stale,
        ForceAdvanceOutcome::PhaseAlreadyClosed {
            status: RoundStatus::Voting
        }
    );

    let db = require_db(&state).unwrap();
    assert_eq!(
        rounds::require_round(db, round.id).await.unwrap().status,
        RoundStatus::Voting
    );
}
