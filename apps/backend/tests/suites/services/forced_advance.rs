//! Timer expiry handling, including empty rounds and the deadline-gated policy.

use bluff_backend::config::engine::{EngineConfig, ForceAdvancePolicy};
use bluff_backend::db::require_db;
use bluff_backend::domain::{GameStatus, RoundStatus};
use bluff_backend::repos::{answers, games, players, round_scores, rounds};
use bluff_backend::services::round_flow::{ForceAdvanceOutcome, PhaseOutcome, RoundFlowService};

use crate::support::game_setup::{open_round, setup_answering_round, setup_playing_game};
use crate::support::test_state::{test_state, test_state_with};

#[tokio::test]
async fn test_empty_round_still_reaches_voting_then_completion() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 3, 1).await;
    let flow = RoundFlowService::from_state(&state);
    let db = require_db(&state).unwrap();

    let first = flow.force_advance(&state, round.id, None).await.unwrap();
    assert_eq!(
        first,
        ForceAdvanceOutcome::Advanced {
            phase: PhaseOutcome::VotingOpened
        }
    );
    let only = answers::list_by_round(db, round.id).await.unwrap();
    assert_eq!(only.len(), 1);
    assert!(only[0].is_correct && only[0].player_id.is_none());

    let voting = rounds::require_round(db, round.id).await.unwrap();
    assert_eq!(voting.timer_duration_secs, EngineConfig::default().vote_seconds);
    assert!(voting.timer_starts_at >= round.timer_starts_at);

    let second = flow.force_advance(&state, round.id, None).await.unwrap();
    assert_eq!(
        second,
        ForceAdvanceOutcome::Advanced {
            phase: PhaseOutcome::RoundCompleted {
                game_status: GameStatus::Finished,
                current_round: 1
            }
        }
    );

    assert!(round_scores::list_by_round(db, round.id).await.unwrap().is_empty());
    assert!(players::list_by_game(db, game.game_id)
        .await
        .unwrap()
        .iter()
        .all(|p| p.score == 0));
    assert_eq!(
        games::require_game(db, game.game_id).await.unwrap().status,
        GameStatus::Finished
    );
}

#[tokio::test]
async fn test_game_finishes_after_last_configured_round() {
    let state = test_state().await;
    let game = setup_playing_game(&state, 2, 4).await;
    let flow = RoundFlowService::from_state(&state);
    let db = require_db(&state).unwrap();

    for number in 1..=4i16 {
        let round = open_round(&state, &game).await;
        assert_eq!(round.round_number, number);
        flow.force_advance(&state, round.id, None).await.unwrap();
        let outcome = flow.force_advance(&state, round.id, None).await.unwrap();

        let expected = if number < 4 {
            PhaseOutcome::RoundCompleted {
                game_status: GameStatus::Playing,
                current_round: number + 1,
            }
        } else {
            PhaseOutcome::RoundCompleted {
                game_status: GameStatus::Finished,
                current_round: 4,
            }
        };
        assert_eq!(outcome, ForceAdvanceOutcome::Advanced { phase: expected });
    }

    let finished = games::require_game(db, game.game_id).await.unwrap();
    assert_eq!(finished.status, GameStatus::Finished);
    assert_eq!(finished.current_round, 4);
    assert_eq!(rounds::list_by_game(db, game.game_id).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_deadline_policy_refuses_early_expiry() {
    let engine = EngineConfig {
        force_advance: ForceAdvancePolicy::AfterDeadline,
        ..EngineConfig::default()
    };
    let state = test_state_with(engine).await;
    let (_game, round) = setup_answering_round(&state, 2, 1).await;

    let outcome = RoundFlowService::from_state(&state)
        .force_advance(&state, round.id, None)
        .await
        .unwrap();
    match outcome {
        ForceAdvanceOutcome::NotExpired { remaining_ms } => {
            assert!(remaining_ms > 0 && remaining_ms <= 60_000);
        }
        other => panic!("expected not_expired, got {other:?}"),
    }

    let db = require_db(&state).unwrap();
    assert_eq!(
        rounds::require_round(db, round.id).await.unwrap().status,
        RoundStatus::Answering
    );
}

#[tokio::test]
async fn test_deadline_policy_accepts_expiry_within_skew() {
    // one-second phases with 1.5s of skew tolerance are expired on arrival
    let engine = EngineConfig {
        answer_seconds: 1,
        vote_seconds: 1,
        force_advance: ForceAdvancePolicy::AfterDeadline,
        clock_skew_ms: 1500,
        ..EngineConfig::default()
    };
    let state = test_state_with(engine).await;
    let (_game, round) = setup_answering_round(&state, 2, 1).await;

    let outcome = RoundFlowService::from_state(&state)
        .force_advance(&state, round.id, None)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ForceAdvanceOutcome::Advanced {
            phase: PhaseOutcome::VotingOpened
        }
    );
}

#[tokio::test]
async fn test_force_on_unknown_round_is_not_found() {
    let state = test_state().await;
    let err = RoundFlowService::from_state(&state)
        .force_advance(&state, 9_999, None)
        .await
        .unwrap_err();
    assert_eq!(err.code().as_str(), "ROUND_NOT_FOUND");
}
