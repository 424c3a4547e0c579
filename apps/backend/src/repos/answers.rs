//! Answer repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::answers_sea as answers_adapter;
use crate::domain::scoring::ScoredAnswer;
use crate::entities::answers;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub id: i64,
    pub round_id: i64,
    pub player_id: Option<i64>,
    pub text: String,
    pub is_correct: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

impl Answer {
    pub fn is_system_seeded(&self) -> bool {
        self.player_id.is_none()
    }

    pub fn as_scored(&self) -> ScoredAnswer {
        ScoredAnswer {
            answer_id: self.id,
            author_id: self.player_id,
            is_correct: self.is_correct,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    answer_id: i64,
) -> Result<Option<Answer>, DomainError> {
    Ok(answers_adapter::find_by_id(conn, answer_id)
        .await?
        .map(Answer::from))
}

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Answer>, DomainError> {
    let rows = answers_adapter::list_by_round(conn, round_id).await?;
    Ok(rows.into_iter().map(Answer::from).collect())
}

pub async fn count_player_answers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(answers_adapter::count_player_answers(conn, round_id).await?)
}

pub async fn find_correct<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Answer>, DomainError> {
    Ok(answers_adapter::find_correct(conn, round_id)
        .await?
        .map(Answer::from))
}

pub async fn find_by_round_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    player_id: i64,
) -> Result<Option<Answer>, DomainError> {
    Ok(
        answers_adapter::find_by_round_and_player(conn, round_id, player_id)
            .await?
            .map(Answer::from),
    )
}

pub async fn create_player_answer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    player_id: i64,
    text: String,
    now: OffsetDateTime,
) -> Result<Answer, DomainError> {
    let dto = answers_adapter::AnswerCreate {
        round_id,
        player_id: Some(player_id),
        text,
        is_correct: false,
    };
    Ok(Answer::from(
        answers_adapter::create_answer(conn, dto, now).await?,
    ))
}

/// Insert the correct answer unless one is already present; returns whichever row exists.
pub async fn seed_correct_answer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    text: String,
    now: OffsetDateTime,
) -> Result<(Answer, bool), DomainError> {
    if let Some(existing) = find_correct(conn, round_id).await? {
        return Ok((existing, false));
    }
    let dto = answers_adapter::AnswerCreate {
        round_id,
        player_id: None,
        text,
        is_correct: true,
    };
    let inserted = answers_adapter::create_answer(conn, dto, now).await?;
    Ok((Answer::from(inserted), true))
}

impl From<answers::Model> for Answer {
    fn from(model: answers::Model) -> Self {
        Self {
            id: model.id,
            round_id: model.round_id,
            player_id: model.player_id,
            text: model.text,
            is_correct: model.is_correct,
            submitted_at: model.submitted_at,
        }
    }
}
