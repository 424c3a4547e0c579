//! SeaORM adapter for games.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QuerySelect,
    Set,
};
use time::OffsetDateTime;

use crate::db::supports_row_locks;
use crate::entities::games::{self, GameStatus};

pub mod dto;

pub use dto::GameCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Same as [`find_by_id`] but takes a row lock on Postgres.
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    let mut query = games::Entity::find_by_id(game_id);
    if supports_row_locks(conn) {
        query = query.lock_exclusive();
    }
    query.one(conn).await
}

pub async fn find_by_join_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    join_code: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::JoinCode.eq(join_code))
        .one(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
    now: OffsetDateTime,
) -> Result<games::Model, sea_orm::DbErr> {
    let game = games::ActiveModel {
        id: NotSet,
        join_code: Set(dto.join_code),
        status: Set(GameStatus::Waiting),
        round_count: Set(dto.round_count),
        current_round: Set(0),
        max_players: Set(dto.max_players),
        host_player_id: Set(None),
        leader_player_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    game.insert(conn).await
}

/// Install host and leader once the host's player row exists.
pub async fn set_host<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: games::Model,
    host_player_id: i64,
    now: OffsetDateTime,
) -> Result<games::Model, sea_orm::DbErr> {
    let mut game: games::ActiveModel = game.into();
    game.host_player_id = Set(Some(host_player_id));
    game.leader_player_id = Set(Some(host_player_id));
    game.updated_at = Set(now);
    game.update(conn).await
}

pub async fn set_leader<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: games::Model,
    leader_player_id: i64,
    now: OffsetDateTime,
) -> Result<games::Model, sea_orm::DbErr> {
    let mut game: games::ActiveModel = game.into();
    game.leader_player_id = Set(Some(leader_player_id));
    game.updated_at = Set(now);
    game.update(conn).await
}

/// Write status and current round together.
pub async fn set_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: games::Model,
    status: GameStatus,
    current_round: i16,
    now: OffsetDateTime,
) -> Result<games::Model, sea_orm::DbErr> {
    let mut game: games::ActiveModel = game.into();
    game.status = Set(status);
    game.current_round = Set(current_round);
    game.updated_at = Set(now);
    game.update(conn).await
}
