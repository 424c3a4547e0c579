//! SeaORM adapter for rounds.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::db::supports_row_locks;
use crate::entities::rounds::{self, RoundStatus};

pub mod dto;

pub use dto::RoundCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id).one(conn).await
}

/// Same as [`find_by_id`] but takes a row lock on Postgres.
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    let mut query = rounds::Entity::find_by_id(round_id);
    if supports_row_locks(conn) {
        query = query.lock_exclusive();
    }
    query.one(conn).await
}

pub async fn find_by_game_and_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    round_number: i16,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::GameId.eq(game_id))
        .filter(rounds::Column::RoundNumber.eq(round_number))
        .one(conn)
        .await
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::GameId.eq(game_id))
        .order_by_asc(rounds::Column::RoundNumber)
        .all(conn)
        .await
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
    now: OffsetDateTime,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let round = rounds::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        round_number: Set(dto.round_number),
        question_id: Set(dto.question_id),
        status: Set(dto.status),
        required_players: Set(dto.required_players),
        timer_starts_at: Set(dto.timer_starts_at),
        timer_duration_secs: Set(dto.timer_duration_secs),
        created_at: Set(now),
        completed_at: Set(None),
    };
    round.insert(conn).await
}

/// Move to `status` and restart the phase timer. `required_players` is never touched.
pub async fn set_phase<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: rounds::Model,
    status: RoundStatus,
    timer_starts_at: OffsetDateTime,
    timer_duration_secs: i32,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let mut round: rounds::ActiveModel = round.into();
    round.status = Set(status);
    round.timer_starts_at = Set(timer_starts_at);
    round.timer_duration_secs = Set(timer_duration_secs);
    round.update(conn).await
}

pub async fn complete_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: rounds::Model,
    now: OffsetDateTime,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let mut round: rounds::ActiveModel = round.into();
    round.status = Set(RoundStatus::Completed);
    round.completed_at = Set(Some(now));
    round.update(conn).await
}
