//! SeaORM adapter for players.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::players;

pub mod dto;

pub use dto::PlayerCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

/// Roster in join order.
pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::GameId.eq(game_id))
        .order_by_asc(players::Column::JoinedAt)
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

pub async fn count_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::GameId.eq(game_id))
        .count(conn)
        .await
}

pub async fn count_connected<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::GameId.eq(game_id))
        .filter(players::Column::IsConnected.eq(true))
        .count(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
    now: OffsetDateTime,
) -> Result<players::Model, sea_orm::DbErr> {
    let player = players::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        display_name: Set(dto.display_name),
        score: Set(0),
        is_connected: Set(true),
        connected_since: Set(Some(now)),
        joined_at: Set(now),
    };
    player.insert(conn).await
}

pub async fn set_connection<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: players::Model,
    is_connected: bool,
    connected_since: Option<OffsetDateTime>,
) -> Result<players::Model, sea_orm::DbErr> {
    let mut player: players::ActiveModel = player.into();
    player.is_connected = Set(is_connected);
    player.connected_since = Set(connected_since);
    player.update(conn).await
}

pub async fn set_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: players::Model,
    score: i32,
) -> Result<players::Model, sea_orm::DbErr> {
    let mut player: players::ActiveModel = player.into();
    player.score = Set(score);
    player.update(conn).await
}
