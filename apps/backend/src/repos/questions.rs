//! Question repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::questions_sea as questions_adapter;
use crate::entities::questions;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: i64,
    pub prompt: String,
    #[serde(skip_serializing)]
    pub correct_answer: String,
}

pub async fn require_question<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    question_id: i64,
) -> Result<Question, DomainError> {
    questions_adapter::find_by_id(conn, question_id)
        .await?
        .map(Question::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Question,
                format!("Question {question_id} not found"),
            )
        })
}

pub async fn create_question<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prompt: String,
    correct_answer: String,
    now: OffsetDateTime,
) -> Result<Question, DomainError> {
    let model = questions_adapter::create_question(conn, prompt, correct_answer, now).await?;
    Ok(Question::from(model))
}

impl From<questions::Model> for Question {
    fn from(model: questions::Model) -> Self {
        Self {
            id: model.id,
            prompt: model.prompt,
            correct_answer: model.correct_answer,
        }
    }
}
