//! Game session routes.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::games::GameService;
use crate::services::leadership::LeadershipService;
use crate::services::round_flow::RoundFlowService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub host_name: String,
    pub round_count: i16,
    pub max_players: i16,
}

#[derive(Debug, Deserialize)]
pub struct JoinGameRequest {
    pub join_code: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ActingPlayer {
    pub player_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoundRequest {
    pub player_id: i64,
    pub question_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct PromoteRequest {
    pub disconnected_player_id: i64,
}

async fn create_game(
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let seated = GameService::new()
        .create_game(&app_state, &body.host_name, body.round_count, body.max_players)
        .await?;
    Ok(HttpResponse::Created().json(seated))
}

async fn join_game(
    body: ValidatedJson<JoinGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let seated = GameService::new()
        .join_game(&app_state, &body.join_code, &body.display_name)
        .await?;
    Ok(HttpResponse::Created().json(seated))
}

/// GET /api/games/{game_id}/snapshot
async fn get_snapshot(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let snapshot = GameService::new()
        .snapshot(&app_state, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

async fn start_game(
    path: web::Path<i64>,
    body: ValidatedJson<ActingPlayer>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = GameService::new()
        .start_game(&app_state, path.into_inner(), body.player_id)
        .await?;
    Ok(HttpResponse::Ok().json(game))
}

async fn create_round(
    path: web::Path<i64>,
    body: ValidatedJson<CreateRoundRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round = RoundFlowService::from_state(&app_state)
        .open_round(&app_state, path.into_inner(), body.player_id, body.question_id)
        .await?;
    Ok(HttpResponse::Created().json(round))
}

async fn promote_leader(
    path: web::Path<i64>,
    body: ValidatedJson<PromoteRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = LeadershipService::new()
        .promote(&app_state, path.into_inner(), body.disconnected_player_id)
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

async fn connect_player(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let change = GameService::new()
        .mark_connected(&app_state, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(change))
}

async fn disconnect_player(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let change = GameService::new()
        .mark_disconnected(&app_state, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(change))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_game))
        .route("/", web::post().to(create_game))
        .route("/join", web::post().to(join_game))
        .route(
            "/players/{player_id}/connect",
            web::post().to(connect_player),
        )
        .route(
            "/players/{player_id}/disconnect",
            web::post().to(disconnect_player),
        )
        .route("/{game_id}/snapshot", web::get().to(get_snapshot))
        .route("/{game_id}/start", web::post().to(start_game))
        .route("/{game_id}/rounds", web::post().to(create_round))
        .route("/{game_id}/leader/promote", web::post().to(promote_leader));
}
