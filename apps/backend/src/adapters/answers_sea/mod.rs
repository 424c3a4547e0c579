//! SeaORM adapter for answers.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::answers;

pub mod dto;

pub use dto::AnswerCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    answer_id: i64,
) -> Result<Option<answers::Model>, sea_orm::DbErr> {
    answers::Entity::find_by_id(answer_id).one(conn).await
}

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<answers::Model>, sea_orm::DbErr> {
    answers::Entity::find()
        .filter(answers::Column::RoundId.eq(round_id))
        .order_by_asc(answers::Column::Id)
        .all(conn)
        .await
}

/// Answers written by players; the seeded correct answer is excluded.
pub async fn count_player_answers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    answers::Entity::find()
        .filter(answers::Column::RoundId.eq(round_id))
        .filter(answers::Column::PlayerId.is_not_null())
        .count(conn)
        .await
}

pub async fn find_correct<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<answers::Model>, sea_orm::DbErr> {
    answers::Entity::find()
        .filter(answers::Column::RoundId.eq(round_id))
        .filter(answers::Column::IsCorrect.eq(true))
        .one(conn)
        .await
}

pub async fn find_by_round_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    player_id: i64,
) -> Result<Option<answers::Model>, sea_orm::DbErr> {
    answers::Entity::find()
        .filter(answers::Column::RoundId.eq(round_id))
        .filter(answers::Column::PlayerId.eq(player_id))
        .one(conn)
        .await
}

pub async fn create_answer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AnswerCreate,
    now: OffsetDateTime,
) -> Result<answers::Model, sea_orm::DbErr> {
    let answer = answers::ActiveModel {
        id: NotSet,
        round_id: Set(dto.round_id),
        player_id: Set(dto.player_id),
        text: Set(dto.text),
        is_correct: Set(dto.is_correct),
        submitted_at: Set(now),
    };
    answer.insert(conn).await
}
