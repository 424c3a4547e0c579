//! Round routes: answers, votes and the timer-expiry signal.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::domain::RoundStatus;
use crate::error::AppError;
use crate::extractors::{OptionalJson, ValidatedJson};
use crate::services::round_flow::RoundFlowService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub player_id: i64,
    pub text: String,
}

/// Body is optional; `phase` names the phase the client's countdown was for.
/// A body that is present but does not parse is rejected, never ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ForceAdvanceRequest {
    pub phase: Option<RoundStatus>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitVoteRequest {
    pub player_id: i64,
    pub answer_id: i64,
}

/// POST /api/games/rounds/{round_id}/answers
async fn submit_answer(
    path: web::Path<i64>,
    body: ValidatedJson<SubmitAnswerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round_id = path.into_inner();
    let SubmitAnswerRequest { player_id, text } = body.into_inner();
    let receipt = RoundFlowService::from_state(&app_state)
        .submit_answer(&app_state, round_id, player_id, text)
        .await?;
    Ok(HttpResponse::Created().json(receipt))
}

/// POST /api/games/rounds/{round_id}/votes
async fn submit_vote(
    path: web::Path<i64>,
    body: ValidatedJson<SubmitVoteRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round_id = path.into_inner();
    let receipt = RoundFlowService::from_state(&app_state)
        .submit_vote(&app_state, round_id, body.player_id, body.answer_id)
        .await?;
    Ok(HttpResponse::Created().json(receipt))
}

/// POST /api/games/rounds/{round_id}/force-advance
///
/// Every outcome is a 200: clients racing on the same expiry all get an answer.
async fn force_advance(
    path: web::Path<i64>,
    body: OptionalJson<ForceAdvanceRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let expected = body.into_inner().and_then(|b| b.phase);
    let outcome = RoundFlowService::from_state(&app_state)
        .force_advance(&app_state, path.into_inner(), expected)
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/rounds/{round_id}/answers", web::post().to(submit_answer))
        .route("/rounds/{round_id}/votes", web::post().to(submit_vote))
        .route(
            "/rounds/{round_id}/force-advance",
            web::post().to(force_advance),
        );
}
