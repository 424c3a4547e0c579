//! Question bank stand-in: questions are created ahead of rounds and looked up by id.

use time::OffsetDateTime;
use tracing::info;

use crate::db::txn::with_txn;
use crate::domain::answer_text::{self, MAX_ANSWER_CHARS};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::questions::{self, Question};
use crate::state::app_state::AppState;

pub const MAX_PROMPT_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionService;

impl QuestionService {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_question(
        &self,
        state: &AppState,
        prompt: &str,
        correct_answer: &str,
    ) -> Result<Question, AppError> {
        let prompt = answer_text::clean(prompt, MAX_PROMPT_CHARS).ok_or_else(|| {
            DomainError::validation_other(format!("Prompt must be 1-{MAX_PROMPT_CHARS} characters"))
        })?;
        let correct_answer = answer_text::clean(correct_answer, MAX_ANSWER_CHARS).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidAnswer,
                format!("Correct answer must be 1-{MAX_ANSWER_CHARS} characters"),
            )
        })?;

        let question = with_txn(state, move |txn| {
            Box::pin(async move {
                let now = OffsetDateTime::now_utc();
                Ok::<_, AppError>(
                    questions::create_question(txn, prompt, correct_answer, now).await?,
                )
            })
        })
        .await?;
        info!(question_id = question.id, "question created");
        Ok(question)
    }
}
