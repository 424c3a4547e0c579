use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::{ForceAdvanceOutcome, RoundFlowService};
use crate::config::engine::ForceAdvancePolicy;
use crate::domain::phase::decide_exit;
use crate::domain::RoundStatus;
use crate::errors::domain::DomainError;
use crate::events::GameEvent;
use crate::repos::{games, rounds};

impl RoundFlowService {
    /// Close the active phase without comparing against quorum.
    ///
    /// Safe to call concurrently and redundantly: whichever caller arrives
    /// second finds the phase already advanced and, once the round is
    /// completed, gets `AlreadyCompleted`. With `expected` set, a round that
    /// has already left that phase is reported and left alone.
    pub async fn force<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
        expected: Option<RoundStatus>,
        now: OffsetDateTime,
        events: &mut Vec<GameEvent>,
    ) -> Result<ForceAdvanceOutcome, DomainError> {
        let round = rounds::lock_round(conn, round_id).await?;
        let game = games::lock_game(conn, round.game_id).await?;

        match round.status {
            RoundStatus::Completed => {
                debug!(round_id, "force-advance: round already completed");
                return Ok(ForceAdvanceOutcome::AlreadyCompleted);
            }
            RoundStatus::Pending => {
                debug!(round_id, "force-advance: round not started");
                return Ok(ForceAdvanceOutcome::NotStarted);
            }
            RoundStatus::Answering | RoundStatus::Voting => {}
        }

        if let Some(expected) = expected {
            if expected != round.status {
                debug!(round_id, ?expected, status = ?round.status, "force-advance: phase already closed");
                return Ok(ForceAdvanceOutcome::PhaseAlreadyClosed {
                    status: round.status,
                });
            }
        }

        if self.engine.force_advance == ForceAdvancePolicy::AfterDeadline {
            let timer = round.timer();
            if !timer.expired(now, self.engine.clock_skew_ms) {
                let remaining_ms = timer.remaining_ms(now);
                debug!(round_id, remaining_ms, "force-advance: deadline not reached");
                return Ok(ForceAdvanceOutcome::NotExpired { remaining_ms });
            }
        }

        let Some(exit) = decide_exit(round.status, 0, round.required_players, true) else {
            return Ok(ForceAdvanceOutcome::AlreadyCompleted);
        };
        info!(round_id, status = ?round.status, "force-advance: closing phase");
        let phase = self.run_exit(conn, exit, round, game, now, events).await?;
        Ok(ForceAdvanceOutcome::Advanced { phase })
    }
}
