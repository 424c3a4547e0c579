//! Game repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::games_sea as games_adapter;
use crate::domain::GameStatus;
use crate::entities::games;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Game domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    pub id: i64,
    pub join_code: String,
    pub status: GameStatus,
    pub round_count: i16,
    pub current_round: i16,
    pub max_players: i16,
    pub host_player_id: Option<i64>,
    pub leader_player_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    Ok(games_adapter::find_by_id(conn, game_id).await?.map(Game::from))
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id).await?.ok_or_else(|| game_not_found(game_id))
}

/// Load and row-lock the game (row lock applies on Postgres only).
pub async fn lock_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    games_adapter::find_by_id_for_update(conn, game_id)
        .await?
        .map(Game::from)
        .ok_or_else(|| game_not_found(game_id))
}

pub async fn find_by_join_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    join_code: &str,
) -> Result<Option<Game>, DomainError> {
    Ok(games_adapter::find_by_join_code(conn, join_code)
        .await?
        .map(Game::from))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    join_code: String,
    round_count: i16,
    max_players: i16,
    now: OffsetDateTime,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameCreate {
        join_code,
        round_count,
        max_players,
    };
    Ok(Game::from(games_adapter::create_game(conn, dto, now).await?))
}

pub async fn set_host<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
    host_player_id: i64,
    now: OffsetDateTime,
) -> Result<Game, DomainError> {
    let model = games_adapter::set_host(conn, game.to_model(), host_player_id, now).await?;
    Ok(Game::from(model))
}

pub async fn set_leader<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
    leader_player_id: i64,
    now: OffsetDateTime,
) -> Result<Game, DomainError> {
    let model = games_adapter::set_leader(conn, game.to_model(), leader_player_id, now).await?;
    Ok(Game::from(model))
}

/// Persist a status/current_round pair. Status never moves backwards.
pub async fn set_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
    status: GameStatus,
    current_round: i16,
    now: OffsetDateTime,
) -> Result<Game, DomainError> {
    if status != game.status && !game.status.can_become(status) {
        return Err(DomainError::validation(
            crate::errors::domain::ValidationKind::PhaseMismatch,
            format!("Game {} cannot move from {:?} to {status:?}", game.id, game.status),
        ));
    }
    let model =
        games_adapter::set_progress(conn, game.to_model(), status.into(), current_round, now)
            .await?;
    Ok(Game::from(model))
}

fn game_not_found(game_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
}

impl Game {
    fn to_model(&self) -> games::Model {
        games::Model {
            id: self.id,
            join_code: self.join_code.clone(),
            status: self.status.into(),
            round_count: self.round_count,
            current_round: self.current_round,
            max_players: self.max_players,
            host_player_id: self.host_player_id,
            leader_player_id: self.leader_player_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// Conversions between SeaORM models and domain models

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            join_code: model.join_code,
            status: model.status.into(),
            round_count: model.round_count,
            current_round: model.current_round,
            max_players: model.max_players,
            host_player_id: model.host_player_id,
            leader_player_id: model.leader_player_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<games::GameStatus> for GameStatus {
    fn from(status: games::GameStatus) -> Self {
        match status {
            games::GameStatus::Waiting => GameStatus::Waiting,
            games::GameStatus::Playing => GameStatus::Playing,
            games::GameStatus::Finished => GameStatus::Finished,
        }
    }
}

impl From<GameStatus> for games::GameStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Waiting => games::GameStatus::Waiting,
            GameStatus::Playing => games::GameStatus::Playing,
            GameStatus::Finished => games::GameStatus::Finished,
        }
    }
}
