//! SeaORM adapter for the question bank.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, Set};
use time::OffsetDateTime;

use crate::entities::questions;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    question_id: i64,
) -> Result<Option<questions::Model>, sea_orm::DbErr> {
    questions::Entity::find_by_id(question_id).one(conn).await
}

pub async fn create_question<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prompt: String,
    correct_answer: String,
    now: OffsetDateTime,
) -> Result<questions::Model, sea_orm::DbErr> {
    let question = questions::ActiveModel {
        id: NotSet,
        prompt: Set(prompt),
        correct_answer: Set(correct_answer),
        created_at: Set(now),
    };
    question.insert(conn).await
}
