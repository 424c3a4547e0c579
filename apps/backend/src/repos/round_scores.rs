//! Scoring ledger repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::round_scores_sea as scores_adapter;
use crate::domain::PlayerDelta;
use crate::entities::round_scores;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundScore {
    pub round_id: i64,
    pub player_id: i64,
    pub correct_guess_points: i32,
    pub fooled_points: i32,
    pub perfect_fake_points: i32,
    pub winner_bonus: i32,
    pub round_total: i32,
    pub total_after: i32,
}

pub async fn record<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    player_id: i64,
    delta: &PlayerDelta,
    total_after: i32,
    now: OffsetDateTime,
) -> Result<RoundScore, DomainError> {
    let dto = scores_adapter::RoundScoreCreate {
        round_id,
        player_id,
        correct_guess_points: delta.correct_guess,
        fooled_points: delta.fooled,
        perfect_fake_points: delta.perfect_fake,
        winner_bonus: delta.winner_bonus,
        round_total: delta.total(),
        total_after,
    };
    Ok(RoundScore::from(
        scores_adapter::create_score(conn, dto, now).await?,
    ))
}

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<RoundScore>, DomainError> {
    let rows = scores_adapter::list_by_round(conn, round_id).await?;
    Ok(rows.into_iter().map(RoundScore::from).collect())
}

impl From<round_scores::Model> for RoundScore {
    fn from(model: round_scores::Model) -> Self {
        Self {
            round_id: model.round_id,
            player_id: model.player_id,
            correct_guess_points: model.correct_guess_points,
            fooled_points: model.fooled_points,
            perfect_fake_points: model.perfect_fake_points,
            winner_bonus: model.winner_bonus,
            round_total: model.round_total,
            total_after: model.total_after,
        }
    }
}
