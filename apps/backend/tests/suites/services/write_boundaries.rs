//! Rejected writes: each check fires with its own code and writes nothing.

use bluff_backend::db::require_db;
use bluff_backend::errors::ErrorCode;
use bluff_backend::repos::{answers, votes};
use bluff_backend::services::round_flow::RoundFlowService;

use crate::support::game_setup::{
    correct_answer, create_question, open_round, setup_answering_round,
};
use crate::support::test_state::test_state;

#[tokio::test]
async fn test_answer_rejections() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 3, 2).await;
    let (other_game, _) = setup_answering_round(&state, 2, 2).await;
    let flow = RoundFlowService::from_state(&state);
    let p1 = game.player(0);

    let cases = [
        (p1, "   ", ErrorCode::InvalidAnswer),
        (p1, "  pARis ", ErrorCode::AnswerMatchesTruth),
        (other_game.player(1), "Lyon", ErrorCode::NotAMember),
        (424_242, "Lyon", ErrorCode::PlayerNotFound),
    ];
    for (player_id, text, code) in cases {
        let err = flow
            .submit_answer(&state, round.id, player_id, text.into())
            .await
            .unwrap_err();
        assert_eq!(err.code(), code, "answer {text:?}");
    }
    let too_long = "x".repeat(201);
    let err = flow
        .submit_answer(&state, round.id, p1, too_long)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidAnswer);

    let db = require_db(&state).unwrap();
    assert!(answers::list_by_round(db, round.id).await.unwrap().is_empty());

    flow.submit_answer(&state, round.id, p1, "Lyon".into())
        .await
        .unwrap();
    let err = flow
        .submit_answer(&state, round.id, p1, "Nice".into())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyAnswered);
    assert_eq!(answers::list_by_round(db, round.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_vote_rejections() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 3, 2).await;
    let flow = RoundFlowService::from_state(&state);
    let (p1, p2) = (game.player(0), game.player(1));

    let own = flow
        .submit_answer(&state, round.id, p1, "Lyon".into())
        .await
        .unwrap();

    let err = flow
        .submit_vote(&state, round.id, p2, own.answer_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch, "no votes while answering");

    flow.force_advance(&state, round.id, None).await.unwrap();

    let err = flow
        .submit_vote(&state, round.id, p1, own.answer_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SelfVote);

    let err = flow
        .submit_answer(&state, round.id, p2, "Nice".into())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch, "no answers while voting");

    let (_, elsewhere) = setup_answering_round(&state, 2, 2).await;
    flow.force_advance(&state, elsewhere.id, None).await.unwrap();
    let foreign = correct_answer(&state, elsewhere.id).await;
    let err = flow
        .submit_vote(&state, round.id, p2, foreign.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AnswerNotInRound);

    let db = require_db(&state).unwrap();
    assert!(votes::list_by_round(db, round.id).await.unwrap().is_empty());

    flow.submit_vote(&state, round.id, p2, own.answer_id)
        .await
        .unwrap();
    let truth = correct_answer(&state, round.id).await;
    let err = flow
        .submit_vote(&state, round.id, p2, truth.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyVoted);
    assert_eq!(votes::list_by_round(db, round.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_round_creation_rejections() {
    let state = test_state().await;
    let (game, round) = setup_answering_round(&state, 2, 2).await;
    let flow = RoundFlowService::from_state(&state);
    let question_id = create_question(&state).await;

    let err = flow
        .open_round(&state, game.game_id, game.player(1), question_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotLeader);

    let err = flow
        .open_round(&state, game.game_id, game.host(), question_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoundAlreadyExists);

    flow.force_advance(&state, round.id, None).await.unwrap();
    flow.force_advance(&state, round.id, None).await.unwrap();
    let err = flow
        .open_round(&state, game.game_id, game.host(), 987_654)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::QuestionNotFound);

    let next = open_round(&state, &game).await;
    assert_eq!(next.round_number, 2);
}
