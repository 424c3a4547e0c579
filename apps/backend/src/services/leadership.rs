//! Leadership election for the round-creation leader.
//!
//! Independent of the round phase machine: it only ever takes the game lock
//! and only ever writes `games.leader_player_id`.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};

use crate::domain::leadership::{elect_successor, Candidate, LeadershipDecision};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::events::GameEvent;
use crate::repos::{games, players};
use crate::services::scope::in_game_scope;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PromotionOutcome {
    Promoted {
        previous_leader_id: i64,
        new_leader_id: i64,
    },
    /// Reported player is not the current leader, or has reconnected
    NotNeeded,
    /// No connected player remains; leader left unchanged
    NoEligiblePlayer,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LeadershipService;

impl LeadershipService {
    pub fn new() -> Self {
        Self
    }

    /// Replace `disconnected_player_id` as leader if it still is the leader
    /// and is still disconnected.
    pub async fn promote_in_txn<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        disconnected_player_id: i64,
        now: OffsetDateTime,
        events: &mut Vec<GameEvent>,
    ) -> Result<PromotionOutcome, DomainError> {
        let game = games::lock_game(conn, game_id).await?;
        let roster: Vec<Candidate> = players::list_by_game(conn, game_id)
            .await?
            .iter()
            .map(|p| p.as_candidate())
            .collect();

        match elect_successor(
            game.leader_player_id,
            game.host_player_id,
            disconnected_player_id,
            &roster,
        ) {
            LeadershipDecision::NotNeeded => {
                debug!(
                    game_id,
                    disconnected_player_id,
                    leader = ?game.leader_player_id,
                    "promotion not needed"
                );
                Ok(PromotionOutcome::NotNeeded)
            }
            LeadershipDecision::NoEligiblePlayer => {
                warn!(game_id, disconnected_player_id, "no connected player to promote");
                Ok(PromotionOutcome::NoEligiblePlayer)
            }
            LeadershipDecision::Promote(new_leader_id) => {
                games::set_leader(conn, &game, new_leader_id, now).await?;
                info!(
                    game_id,
                    previous_leader_id = disconnected_player_id,
                    new_leader_id,
                    "leader promoted"
                );
                events.push(GameEvent::LeaderChanged {
                    game_id,
                    previous_leader_id: Some(disconnected_player_id),
                    leader_id: new_leader_id,
                });
                Ok(PromotionOutcome::Promoted {
                    previous_leader_id: disconnected_player_id,
                    new_leader_id,
                })
            }
        }
    }

    #[instrument(skip(self, state))]
    pub async fn promote(
        &self,
        state: &AppState,
        game_id: i64,
        disconnected_player_id: i64,
    ) -> Result<PromotionOutcome, AppError> {
        let service = *self;
        in_game_scope(state, game_id, move |txn, now| {
            Box::pin(async move {
                let mut events = Vec::new();
                let outcome = service
                    .promote_in_txn(txn, game_id, disconnected_player_id, now, &mut events)
                    .await?;
                Ok((outcome, events))
            })
        })
        .await
    }
}
