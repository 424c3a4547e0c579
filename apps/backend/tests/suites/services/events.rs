//! Change notifications are published after commit and only for committed work.

use bluff_backend::domain::{GameStatus, RoundStatus};
use bluff_backend::events::GameEvent;
use bluff_backend::services::games::GameService;
use bluff_backend::services::round_flow::RoundFlowService;
use tokio::sync::broadcast::Receiver;

use crate::support::game_setup::{correct_answer, setup_answering_round, setup_waiting_game};
use crate::support::test_state::test_state;

fn drain(rx: &mut Receiver<GameEvent>) -> Vec<GameEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        seen.push(event);
    }
    seen
}

#[tokio::test]
async fn test_join_and_connection_changes_are_announced() {
    let state = test_state().await;
    let game = setup_waiting_game(&state, 1, 2).await;
    let mut rx = state.events.subscribe(game.game_id);
    let games = GameService::new();

    let joined = games.join_game(&state, &game.join_code, "Bob").await.unwrap();
    games.mark_disconnected(&state, joined.player.id).await.unwrap();
    // second disconnect is a no-op and stays silent
    games.mark_disconnected(&state, joined.player.id).await.unwrap();

    let seen = drain(&mut rx);
    assert_eq!(
        seen,
        vec![
            GameEvent::PlayerJoined {
                game_id: game.game_id,
                player_id: joined.player.id,
                display_name: "Bob".into(),
            },
            GameEvent::PlayerConnectionChanged {
                game_id: game.game_id,
                player_id: joined.player.id,
                is_connected: false,
            },
        ]
    );
}

#[tokio::test]
async fn test_rejected_write_publishes_nothing() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 2, 2).await;
    let mut rx = state.events.subscribe(game.game_id);

    let err = RoundFlowService::from_state(&state)
        .submit_answer(&state, round.id, game.player(0), "paris".into())
        .await;
    assert!(err.is_err());
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_round_completion_sequence() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 2, 1).await;
    let flow = RoundFlowService::from_state(&state);
    let (p1, p2) = (game.player(0), game.player(1));

    flow.submit_answer(&state, round.id, p1, "Lyon".into())
        .await
        .unwrap();
    flow.submit_answer(&state, round.id, p2, "Nice".into())
        .await
        .unwrap();

    let mut rx = state.events.subscribe(game.game_id);
    let truth = correct_answer(&state, round.id).await;
    flow.submit_vote(&state, round.id, p1, truth.id).await.unwrap();
    assert!(drain(&mut rx).is_empty(), "below quorum: nothing to announce");
    flow.submit_vote(&state, round.id, p2, truth.id).await.unwrap();

    let seen = drain(&mut rx);
    let scores: Vec<(i64, i32)> = seen
        .iter()
        .filter_map(|e| match e {
            GameEvent::ScoreChanged { player_id, delta, .. } => Some((*player_id, *delta)),
            _ => None,
        })
        .collect();
    assert_eq!(scores.len(), 2);
    assert!(scores.iter().all(|(_, delta)| *delta == 2000));

    assert!(seen.iter().any(|e| matches!(
        e,
        GameEvent::RoundStatusChanged { status: RoundStatus::Completed, deadline: None, .. }
    )));
    assert_eq!(
        seen.last(),
        Some(&GameEvent::GameProgressed {
            game_id: game.game_id,
            status: GameStatus::Finished,
            current_round: 1,
        })
    );
}
