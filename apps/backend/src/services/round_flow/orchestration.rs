use tracing::instrument;

use super::{AnswerReceipt, ForceAdvanceOutcome, PhaseOutcome, RoundFlowService, VoteReceipt};
use crate::domain::RoundStatus;
use crate::error::AppError;
use crate::repos::rounds::Round;
use crate::services::scope::{in_game_scope, in_round_scope};
use crate::state::app_state::AppState;

impl RoundFlowService {
    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.engine)
    }

    #[instrument(skip(self, state, text))]
    pub async fn submit_answer(
        &self,
        state: &AppState,
        round_id: i64,
        player_id: i64,
        text: String,
    ) -> Result<AnswerReceipt, AppError> {
        let service = *self;
        in_round_scope(state, round_id, move |txn, now| {
            Box::pin(async move {
                let mut events = Vec::new();
                let receipt = service
                    .record_answer(txn, round_id, player_id, &text, now, &mut events)
                    .await?;
                Ok((receipt, events))
            })
        })
        .await
    }

    #[instrument(skip(self, state))]
    pub async fn submit_vote(
        &self,
        state: &AppState,
        round_id: i64,
        voter_id: i64,
        answer_id: i64,
    ) -> Result<VoteReceipt, AppError> {
        let service = *self;
        in_round_scope(state, round_id, move |txn, now| {
            Box::pin(async move {
                let mut events = Vec::new();
                let receipt = service
                    .record_vote(txn, round_id, voter_id, answer_id, now, &mut events)
                    .await?;
                Ok((receipt, events))
            })
        })
        .await
    }

    /// Re-check a round's exit condition. Safe to repeat; a satisfied round
    /// transitions once and later calls report `Unchanged`.
    #[instrument(skip(self, state))]
    pub async fn evaluate_round(
        &self,
        state: &AppState,
        round_id: i64,
    ) -> Result<PhaseOutcome, AppError> {
        let service = *self;
        in_round_scope(state, round_id, move |txn, now| {
            Box::pin(async move {
                let mut events = Vec::new();
                let outcome = service.evaluate(txn, round_id, now, &mut events).await?;
                Ok((outcome, events))
            })
        })
        .await
    }

    /// Called when a client's countdown reaches zero. Any number of clients
    /// may call it for the same round.
    #[instrument(skip(self, state))]
    pub async fn force_advance(
        &self,
        state: &AppState,
        round_id: i64,
        expected: Option<RoundStatus>,
    ) -> Result<ForceAdvanceOutcome, AppError> {
        let service = *self;
        in_round_scope(state, round_id, move |txn, now| {
            Box::pin(async move {
                let mut events = Vec::new();
                let outcome = service.force(txn, round_id, expected, now, &mut events).await?;
                Ok((outcome, events))
            })
        })
        .await
    }

    #[instrument(skip(self, state))]
    pub async fn open_round(
        &self,
        state: &AppState,
        game_id: i64,
        requested_by: i64,
        question_id: i64,
    ) -> Result<Round, AppError> {
        let service = *self;
        in_game_scope(state, game_id, move |txn, now| {
            Box::pin(async move {
                let mut events = Vec::new();
                let round = service
                    .create_round(txn, game_id, requested_by, question_id, now, &mut events)
                    .await?;
                Ok((round, events))
            })
        })
        .await
    }
}
