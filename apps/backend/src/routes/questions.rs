//! Question bank routes.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::questions::QuestionService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub prompt: String,
    pub correct_answer: String,
}

/// POST /api/questions
async fn create_question(
    body: ValidatedJson<CreateQuestionRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let question = QuestionService::new()
        .create_question(&app_state, &body.prompt, &body.correct_answer)
        .await?;
    Ok(HttpResponse::Created().json(question))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_question));
}
