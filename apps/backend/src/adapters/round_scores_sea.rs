//! SeaORM adapter for the per-round scoring ledger.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::round_scores;

#[derive(Debug, Clone)]
pub struct RoundScoreCreate {
    pub round_id: i64,
    pub player_id: i64,
    pub correct_guess_points: i32,
    pub fooled_points: i32,
    pub perfect_fake_points: i32,
    pub winner_bonus: i32,
    pub round_total: i32,
    pub total_after: i32,
}

pub async fn create_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundScoreCreate,
    now: OffsetDateTime,
) -> Result<round_scores::Model, sea_orm::DbErr> {
    let score = round_scores::ActiveModel {
        id: NotSet,
        round_id: Set(dto.round_id),
        player_id: Set(dto.player_id),
        correct_guess_points: Set(dto.correct_guess_points),
        fooled_points: Set(dto.fooled_points),
        perfect_fake_points: Set(dto.perfect_fake_points),
        winner_bonus: Set(dto.winner_bonus),
        round_total: Set(dto.round_total),
        total_after: Set(dto.total_after),
        created_at: Set(now),
    };
    score.insert(conn).await
}

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<round_scores::Model>, sea_orm::DbErr> {
    round_scores::Entity::find()
        .filter(round_scores::Column::RoundId.eq(round_id))
        .order_by_asc(round_scores::Column::PlayerId)
        .all(conn)
        .await
}
