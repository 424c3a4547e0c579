use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::info;

use super::RoundFlowService;
use crate::domain::scoring::{score_round, ScoredAnswer, ScoredVote};
use crate::domain::RoundScoring;
use crate::errors::domain::DomainError;
use crate::events::GameEvent;
use crate::repos::rounds::Round;
use crate::repos::{answers, players, round_scores, votes};

impl RoundFlowService {
    /// Compute and apply the round's deltas in one pass.
    ///
    /// Only called from the voting exit action, under the round and game
    /// locks, so it runs once per round.
    pub(super) async fn apply_scoring<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round: &Round,
        now: OffsetDateTime,
        events: &mut Vec<GameEvent>,
    ) -> Result<RoundScoring, DomainError> {
        let round_answers = answers::list_by_round(conn, round.id).await?;
        let round_votes = votes::list_by_round(conn, round.id).await?;

        let scored_answers: Vec<ScoredAnswer> =
            round_answers.iter().map(|a| a.as_scored()).collect();
        let scored_votes: Vec<ScoredVote> = round_votes.iter().map(|v| v.as_scored()).collect();
        let scoring = score_round(&scored_answers, &scored_votes, &self.engine.scoring);

        for vote in &round_votes {
            match scoring.vote_points.get(&vote.id) {
                Some(points) if *points > 0 => {
                    votes::set_points_earned(conn, vote, *points).await?;
                }
                _ => {}
            }
        }

        for (player_id, delta) in &scoring.deltas {
            let player = players::require_player(conn, *player_id).await?;
            let updated = players::add_score(conn, &player, delta.total()).await?;
            round_scores::record(conn, round.id, *player_id, delta, updated.score, now).await?;
            events.push(GameEvent::ScoreChanged {
                game_id: round.game_id,
                player_id: *player_id,
                delta: delta.total(),
                score: updated.score,
            });
        }

        info!(
            game_id = round.game_id,
            round_id = round.id,
            scored_players = scoring.deltas.len(),
            winners = ?scoring.winners(),
            "Round scored"
        );
        Ok(scoring)
    }
}
