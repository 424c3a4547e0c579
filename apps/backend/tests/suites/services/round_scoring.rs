//! End-to-end scoring through the round flow, ledger included.

use bluff_backend::db::require_db;
use bluff_backend::domain::{GameStatus, RoundStatus};
use bluff_backend::repos::{players, round_scores, rounds, votes};
use bluff_backend::services::round_flow::{
    ForceAdvanceOutcome, PhaseOutcome, RoundFlowService,
};

use crate::support::game_setup::{correct_answer, setup_answering_round};
use crate::support::test_state::test_state;

#[tokio::test]
async fn test_three_player_round_scores_like_worked_example() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 3, 3).await;
    let (p1, p2, p3) = (game.player(0), game.player(1), game.player(2));
    let flow = RoundFlowService::from_state(&state);

    let fake_a = flow
        .submit_answer(&state, round.id, p1, "Lyon".into())
        .await
        .unwrap();
    let fake_b = flow
        .submit_answer(&state, round.id, p2, "Marseille".into())
        .await
        .unwrap();
    assert_eq!(fake_a.phase, PhaseOutcome::Unchanged);
    assert_eq!(fake_b.phase, PhaseOutcome::Unchanged);

    // P3 never answers; the countdown closes answering
    let forced = flow.force_advance(&state, round.id, None).await.unwrap();
    assert_eq!(
        forced,
        ForceAdvanceOutcome::Advanced {
            phase: PhaseOutcome::VotingOpened
        }
    );

    let truth = correct_answer(&state, round.id).await;
    let p3_vote = flow
        .submit_vote(&state, round.id, p3, fake_b.answer_id)
        .await
        .unwrap();
    let p1_vote = flow
        .submit_vote(&state, round.id, p1, truth.id)
        .await
        .unwrap();
    assert_eq!(p1_vote.phase, PhaseOutcome::Unchanged);

    let closed = flow.force_advance(&state, round.id, None).await.unwrap();
    assert_eq!(
        closed,
        ForceAdvanceOutcome::Advanced {
            phase: PhaseOutcome::RoundCompleted {
                game_status: GameStatus::Playing,
                current_round: 2,
            }
        }
    );

    let db = require_db(&state).unwrap();
    assert_eq!(players::require_player(db, p1).await.unwrap().score, 2000);
    assert_eq!(players::require_player(db, p2).await.unwrap().score, 500);
    assert_eq!(players::require_player(db, p3).await.unwrap().score, 0);

    let ledger = round_scores::list_by_round(db, round.id).await.unwrap();
    assert_eq!(ledger.len(), 2, "only earners get ledger rows");
    let p1_row = ledger.iter().find(|r| r.player_id == p1).unwrap();
    assert_eq!(p1_row.correct_guess_points, 1000);
    assert_eq!(p1_row.perfect_fake_points, 750);
    assert_eq!(p1_row.fooled_points, 0);
    assert_eq!(p1_row.winner_bonus, 250);
    assert_eq!(p1_row.round_total, 2000);
    assert_eq!(p1_row.total_after, 2000);
    let p2_row = ledger.iter().find(|r| r.player_id == p2).unwrap();
    assert_eq!(p2_row.fooled_points, 500);
    assert_eq!(p2_row.winner_bonus, 0);

    let cast = votes::list_by_round(db, round.id).await.unwrap();
    let points = |vote_id: i64| cast.iter().find(|v| v.id == vote_id).unwrap().points_earned;
    assert_eq!(points(p1_vote.vote_id), 1000);
    assert_eq!(points(p3_vote.vote_id), 0);

    let stored = rounds::require_round(db, round.id).await.unwrap();
    assert_eq!(stored.status, RoundStatus::Completed);
}

#[tokio::test]
async fn test_scores_accumulate_across_rounds() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 2, 2).await;
    let (p1, p2) = (game.player(0), game.player(1));
    let flow = RoundFlowService::from_state(&state);

    // Quorum of two: the second answer opens voting on its own
    flow.submit_answer(&state, round.id, p1, "Lyon".into())
        .await
        .unwrap();
    let second = flow
        .submit_answer(&state, round.id, p2, "Nice".into())
        .await
        .unwrap();
    assert_eq!(second.phase, PhaseOutcome::VotingOpened);

    let truth = correct_answer(&state, round.id).await;
    flow.submit_vote(&state, round.id, p1, truth.id).await.unwrap();
    let last = flow.submit_vote(&state, round.id, p2, truth.id).await.unwrap();
    assert_eq!(
        last.phase,
        PhaseOutcome::RoundCompleted {
            game_status: GameStatus::Playing,
            current_round: 2
        }
    );

    // Both guessed right and both fakes went unpicked: 1000 + 750 + tie bonus 250
    let db = require_db(&state).unwrap();
    assert_eq!(players::require_player(db, p1).await.unwrap().score, 2000);
    assert_eq!(players::require_player(db, p2).await.unwrap().score, 2000);

    let round_two = crate::support::game_setup::open_round(&state, &game).await;
    assert_eq!(round_two.round_number, 2);
    flow.force_advance(&state, round_two.id, None).await.unwrap();
    let truth = correct_answer(&state, round_two.id).await;
    flow.submit_vote(&state, round_two.id, p1, truth.id).await.unwrap();
    let done = flow.force_advance(&state, round_two.id, None).await.unwrap();
    assert_eq!(
        done,
        ForceAdvanceOutcome::Advanced {
            phase: PhaseOutcome::RoundCompleted {
                game_status: GameStatus::Finished,
                current_round: 2
            }
        }
    );

    assert_eq!(players::require_player(db, p1).await.unwrap().score, 3250);
    assert_eq!(players::require_player(db, p2).await.unwrap().score, 2000);
    let ledger = round_scores::list_by_round(db, round_two.id).await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].total_after, 3250);
}
