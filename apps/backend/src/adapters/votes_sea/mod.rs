//! SeaORM adapter for votes.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::votes;

pub mod dto;

pub use dto::VoteCreate;

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<votes::Model>, sea_orm::DbErr> {
    votes::Entity::find()
        .filter(votes::Column::RoundId.eq(round_id))
        .order_by_asc(votes::Column::Id)
        .all(conn)
        .await
}

pub async fn count_distinct_voters<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let voters: Vec<i64> = votes::Entity::find()
        .select_only()
        .column(votes::Column::VoterId)
        .distinct()
        .filter(votes::Column::RoundId.eq(round_id))
        .into_tuple()
        .all(conn)
        .await?;
    Ok(voters.len() as u64)
}

pub async fn find_by_round_and_voter<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    voter_id: i64,
) -> Result<Option<votes::Model>, sea_orm::DbErr> {
    votes::Entity::find()
        .filter(votes::Column::RoundId.eq(round_id))
        .filter(votes::Column::VoterId.eq(voter_id))
        .one(conn)
        .await
}

pub async fn create_vote<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: VoteCreate,
    now: OffsetDateTime,
) -> Result<votes::Model, sea_orm::DbErr> {
    let vote = votes::ActiveModel {
        id: NotSet,
        round_id: Set(dto.round_id),
        voter_id: Set(dto.voter_id),
        answer_id: Set(dto.answer_id),
        points_earned: Set(0),
        created_at: Set(now),
    };
    vote.insert(conn).await
}

pub async fn set_points_earned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    vote: votes::Model,
    points: i32,
) -> Result<votes::Model, sea_orm::DbErr> {
    let mut vote: votes::ActiveModel = vote.into();
    vote.points_earned = Set(points);
    vote.update(conn).await
}
