use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::debug;

use super::{PhaseOutcome, RoundFlowService};
use crate::domain::phase::decide_exit;
use crate::domain::RoundStatus;
use crate::errors::domain::DomainError;
use crate::events::GameEvent;
use crate::repos::{answers, games, rounds, votes};

impl RoundFlowService {
    /// Run after every player answer or vote insert.
    ///
    /// Locks the round row, then the game row, and performs at most one exit
    /// action when the active phase has reached the round's fixed quorum.
    pub async fn evaluate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
        now: OffsetDateTime,
        events: &mut Vec<GameEvent>,
    ) -> Result<PhaseOutcome, DomainError> {
        let round = rounds::lock_round(conn, round_id).await?;
        let game = games::lock_game(conn, round.game_id).await?;

        let submissions = match round.status {
            RoundStatus::Answering => answers::count_player_answers(conn, round.id).await?,
            RoundStatus::Voting => votes::count_distinct_voters(conn, round.id).await?,
            RoundStatus::Pending | RoundStatus::Completed => {
                debug!(round_id, status = ?round.status, "evaluate: nothing to decide");
                return Ok(PhaseOutcome::Unchanged);
            }
        };

        match decide_exit(round.status, submissions, round.required_players, false) {
            Some(exit) => self.run_exit(conn, exit, round, game, now, events).await,
            None => {
                debug!(
                    round_id,
                    status = ?round.status,
                    submissions,
                    required = round.required_players,
                    "evaluate: quorum not met"
                );
                Ok(PhaseOutcome::Unchanged)
            }
        }
    }
}
