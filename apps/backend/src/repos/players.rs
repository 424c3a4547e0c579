//! Player repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::players_sea as players_adapter;
use crate::domain::leadership::Candidate;
use crate::entities::players;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: i64,
    pub game_id: i64,
    pub display_name: String,
    pub score: i32,
    pub is_connected: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub connected_since: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

impl Player {
    pub fn as_candidate(&self) -> Candidate {
        Candidate {
            player_id: self.id,
            is_connected: self.is_connected,
            connected_since: self.connected_since,
            joined_at: self.joined_at,
        }
    }

    fn to_model(&self) -> players::Model {
        players::Model {
            id: self.id,
            game_id: self.game_id,
            display_name: self.display_name.clone(),
            score: self.score,
            is_connected: self.is_connected,
            connected_since: self.connected_since,
            joined_at: self.joined_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    Ok(players_adapter::find_by_id(conn, player_id)
        .await?
        .map(Player::from))
}

pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    find_by_id(conn, player_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} not found"),
        )
    })
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Player>, DomainError> {
    let rows = players_adapter::list_by_game(conn, game_id).await?;
    Ok(rows.into_iter().map(Player::from).collect())
}

pub async fn count_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    Ok(players_adapter::count_by_game(conn, game_id).await?)
}

pub async fn count_connected<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    Ok(players_adapter::count_connected(conn, game_id).await?)
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    display_name: String,
    now: OffsetDateTime,
) -> Result<Player, DomainError> {
    let dto = players_adapter::PlayerCreate {
        game_id,
        display_name,
    };
    Ok(Player::from(
        players_adapter::create_player(conn, dto, now).await?,
    ))
}

/// Connecting stamps `connected_since = now`; disconnecting clears it.
pub async fn set_connected<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &Player,
    connected: bool,
    now: OffsetDateTime,
) -> Result<Player, DomainError> {
    let since = connected.then_some(now);
    let model = players_adapter::set_connection(conn, player.to_model(), connected, since).await?;
    Ok(Player::from(model))
}

/// Add a non-negative delta to the cumulative score.
pub async fn add_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &Player,
    delta: i32,
) -> Result<Player, DomainError> {
    if delta < 0 {
        return Err(DomainError::validation_other(format!(
            "Score delta for player {} must not be negative",
            player.id
        )));
    }
    let model = players_adapter::set_score(conn, player.to_model(), player.score + delta).await?;
    Ok(Player::from(model))
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            display_name: model.display_name,
            score: model.score,
            is_connected: model.is_connected,
            connected_since: model.connected_since,
            joined_at: model.joined_at,
        }
    }
}
