use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::{PhaseOutcome, RoundFlowService};
use crate::domain::phase::{progress_after_round, GameProgress};
use crate::domain::{GameStatus, PhaseExit, RoundStatus};
use crate::errors::domain::DomainError;
use crate::events::GameEvent;
use crate::repos::games::{self, Game};
use crate::repos::rounds::{self, Round};
use crate::repos::{answers, questions};

impl RoundFlowService {
    /// Shared by the evaluator and the forced handler.
    pub(super) async fn run_exit<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        exit: PhaseExit,
        round: Round,
        game: Game,
        now: OffsetDateTime,
        events: &mut Vec<GameEvent>,
    ) -> Result<PhaseOutcome, DomainError> {
        match exit {
            PhaseExit::CloseAnswering => self.close_answering(conn, round, now, events).await,
            PhaseExit::CloseVoting => self.close_voting(conn, round, game, now, events).await,
        }
    }

    /// Seed the correct answer (once) and open voting with a fresh timer.
    async fn close_answering<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round: Round,
        now: OffsetDateTime,
        events: &mut Vec<GameEvent>,
    ) -> Result<PhaseOutcome, DomainError> {
        let question = questions::require_question(conn, round.question_id).await?;

        // Seeded directly here; never routed back through the evaluator.
        let (correct, inserted) =
            answers::seed_correct_answer(conn, round.id, question.correct_answer, now).await?;
        if !inserted {
            debug!(round_id = round.id, answer_id = correct.id, "correct answer already present");
        }

        let round = rounds::advance_phase(
            conn,
            &round,
            RoundStatus::Voting,
            now,
            self.engine.vote_seconds,
        )
        .await?;

        info!(
            game_id = round.game_id,
            round_id = round.id,
            round_number = round.round_number,
            "Transition: answering -> voting"
        );
        events.push(round_status_event(&round));
        Ok(PhaseOutcome::VotingOpened)
    }

    /// Score, complete the round, then advance or finish the game.
    async fn close_voting<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round: Round,
        game: Game,
        now: OffsetDateTime,
        events: &mut Vec<GameEvent>,
    ) -> Result<PhaseOutcome, DomainError> {
        self.apply_scoring(conn, &round, now, events).await?;

        let round = rounds::complete_round(conn, &round, now).await?;
        events.push(round_status_event(&round));

        let (status, current_round) = match progress_after_round(game.current_round, game.round_count)
        {
            GameProgress::Finished => (GameStatus::Finished, game.current_round),
            GameProgress::NextRound(next) => (GameStatus::Playing, next),
        };
        let game = games::set_progress(conn, &game, status, current_round, now).await?;

        info!(
            game_id = game.id,
            round_id = round.id,
            round_number = round.round_number,
            game_status = ?game.status,
            current_round = game.current_round,
            "Transition: voting -> completed"
        );
        events.push(GameEvent::GameProgressed {
            game_id: game.id,
            status: game.status,
            current_round: game.current_round,
        });

        Ok(PhaseOutcome::RoundCompleted {
            game_status: game.status,
            current_round: game.current_round,
        })
    }
}

pub(super) fn round_status_event(round: &Round) -> GameEvent {
    let deadline = match round.status {
        RoundStatus::Answering | RoundStatus::Voting => round
            .timer()
            .deadline()
            .format(&time::format_description::well_known::Rfc3339)
            .ok(),
        RoundStatus::Pending | RoundStatus::Completed => None,
    };
    GameEvent::RoundStatusChanged {
        game_id: round.game_id,
        round_id: round.id,
        round_number: round.round_number,
        status: round.status,
        deadline,
    }
}
