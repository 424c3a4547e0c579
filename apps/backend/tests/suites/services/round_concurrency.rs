//! Racing submissions and racing timer expiries on one round.

use bluff_backend::db::require_db;
use bluff_backend::domain::RoundStatus;
use bluff_backend::events::GameEvent;
use bluff_backend::repos::{answers, rounds};
use bluff_backend::services::round_flow::{ForceAdvanceOutcome, PhaseOutcome, RoundFlowService};

use crate::support::game_setup::setup_answering_round;
use crate::support::test_state::test_state;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_final_answers_transition_exactly_once() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 5, 3).await;
    let mut rx = state.events.subscribe(game.game_id);

    let handles: Vec<_> = game
        .player_ids
        .iter()
        .enumerate()
        .map(|(i, &player_id)| {
            let state = state.clone();
            let round_id = round.id;
            tokio::spawn(async move {
                RoundFlowService::from_state(&state)
                    .submit_answer(&state, round_id, player_id, format!("guess number {i}"))
                    .await
            })
        })
        .collect();

    let mut opened = 0;
    for handle in handles {
        let receipt = handle.await.expect("task").expect("answer accepted");
        if receipt.phase == PhaseOutcome::VotingOpened {
            opened += 1;
        }
    }
    assert_eq!(opened, 1, "exactly one submission closes answering");

    let db = require_db(&state).unwrap();
    let all = answers::list_by_round(db, round.id).await.unwrap();
    assert_eq!(all.len(), 6);
    assert_eq!(all.iter().filter(|a| a.is_correct).count(), 1);
    assert_eq!(
        rounds::require_round(db, round.id).await.unwrap().status,
        RoundStatus::Voting
    );

    let mut voting_events = 0;
    while let Ok(event) = rx.try_recv() {
        if let GameEvent::RoundStatusChanged { status: RoundStatus::Voting, .. } = event {
            voting_events += 1;
        }
    }
    assert_eq!(voting_events, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_expiry_calls_close_only_the_named_phase() {
    let state = test_state().await;
    let (_game, round) = setup_answering_round(&state, 3, 3).await;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let state = state.clone();
            let round_id = round.id;
            tokio::spawn(async move {
                RoundFlowService::from_state(&state)
                    .force_advance(&state, round_id, Some(RoundStatus::Answering))
                    .await
            })
        })
        .collect();

    let mut advanced = 0;
    let mut already_closed = 0;
    for handle in handles {
        match handle.await.expect("task").expect("force accepted") {
            ForceAdvanceOutcome::Advanced {
                phase: PhaseOutcome::VotingOpened,
            } => advanced += 1,
            ForceAdvanceOutcome::PhaseAlreadyClosed {
                status: RoundStatus::Voting,
            } => already_closed += 1,
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    assert_eq!((advanced, already_closed), (1, 3));

    let db = require_db(&state).unwrap();
    assert_eq!(
        rounds::require_round(db, round.id).await.unwrap().status,
        RoundStatus::Voting
    );
    assert!(answers::find_correct(db, round.id).await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_unqualified_force_calls_complete_round_once() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 2, 1).await;
    let mut rx = state.events.subscribe(game.game_id);

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let state = state.clone();
            let round_id = round.id;
            tokio::spawn(async move {
                RoundFlowService::from_state(&state)
                    .force_advance(&state, round_id, None)
                    .await
            })
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.expect("task").expect("force accepted"));
    }

    let count = |wanted: fn(&ForceAdvanceOutcome) -> bool| outcomes.iter().filter(|o| wanted(o)).count();
    assert_eq!(
        count(|o| matches!(o, ForceAdvanceOutcome::Advanced { phase: PhaseOutcome::VotingOpened })),
        1
    );
    assert_eq!(
        count(|o| matches!(o, ForceAdvanceOutcome::Advanced { phase: PhaseOutcome::RoundCompleted { .. } })),
        1
    );
    assert_eq!(count(|o| matches!(o, ForceAdvanceOutcome::AlreadyCompleted)), 4);

    let mut completed_events = 0;
    while let Ok(event) = rx.try_recv() {
        if let GameEvent::RoundStatusChanged { status: RoundStatus::Completed, .. } = event {
            completed_events += 1;
        }
    }
    assert_eq!(completed_events, 1);
}
