//! Snapshot visibility rules per round phase.

use bluff_backend::domain::RoundStatus;
use bluff_backend::services::games::GameService;
use bluff_backend::services::round_flow::RoundFlowService;

use crate::support::game_setup::{correct_answer, setup_answering_round, setup_waiting_game, PROMPT};
use crate::support::test_state::test_state;

#[tokio::test]
async fn test_waiting_game_has_no_round() {
    let state = test_state().await;
    let game = setup_waiting_game(&state, 2, 2).await;
    let snap = GameService::new().snapshot(&state, game.game_id).await.unwrap();
    assert_eq!(snap.players.len(), 2);
    assert!(snap.round.is_none());
}

#[tokio::test]
async fn test_answering_round_hides_answers_and_reports_time_left() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 3, 2).await;
    RoundFlowService::from_state(&state)
        .submit_answer(&state, round.id, game.player(0), "Lyon".into())
        .await
        .unwrap();

    let snap = GameService::new().snapshot(&state, game.game_id).await.unwrap();
    let view = snap.round.expect("round in snapshot");
    assert_eq!(view.round.status, RoundStatus::Answering);
    assert_eq!(view.prompt, PROMPT);
    assert_eq!(view.answers_submitted, 1);
    assert!(view.answers.is_empty());
    assert!(view.remaining_ms > 0 && view.remaining_ms <= 60_000);
    assert!(view.deadline > snap.server_time);
}

#[tokio::test]
async fn test_voting_round_shows_anonymous_answers_then_reveals() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 2, 1).await;
    let flow = RoundFlowService::from_state(&state);
    let games = GameService::new();

    flow.submit_answer(&state, round.id, game.player(0), "Marseille".into())
        .await
        .unwrap();
    flow.submit_answer(&state, round.id, game.player(1), "Bordeaux".into())
        .await
        .unwrap();

    let snap = games.snapshot(&state, game.game_id).await.unwrap();
    let view = snap.round.as_ref().expect("round");
    assert_eq!(view.round.status, RoundStatus::Voting);
    let texts: Vec<&str> = view.answers.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, vec!["Bordeaux", "Marseille", "Paris"]);
    assert!(view
        .answers
        .iter()
        .all(|a| a.author_id.is_none() && a.is_correct.is_none()));

    let json = serde_json::to_value(&snap).unwrap();
    let first = &json["round"]["answers"][0];
    assert!(first.get("author_id").is_none());
    assert!(first.get("is_correct").is_none());

    let truth = correct_answer(&state, round.id).await;
    flow.submit_vote(&state, round.id, game.player(0), truth.id)
        .await
        .unwrap();
    flow.force_advance(&state, round.id, None).await.unwrap();

    let snap = games.snapshot(&state, game.game_id).await.unwrap();
    let view = snap.round.expect("round");
    assert_eq!(view.round.status, RoundStatus::Completed);
    assert_eq!(view.remaining_ms, 0);
    let paris = view.answers.iter().find(|a| a.text == "Paris").unwrap();
    assert_eq!(paris.is_correct, Some(true));
    assert_eq!(paris.author_id, None);
    let marseille = view.answers.iter().find(|a| a.text == "Marseille").unwrap();
    assert_eq!(marseille.author_id, Some(game.player(0)));
    assert!(!view.scores.is_empty());
}

#[tokio::test]
async fn test_snapshot_of_unknown_game_is_not_found() {
    let state = test_state().await;
    let err = GameService::new().snapshot(&state, 77_777).await.unwrap_err();
    assert_eq!(err.code().as_str(), "GAME_NOT_FOUND");
}
