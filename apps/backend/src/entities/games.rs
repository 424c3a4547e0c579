use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum GameStatus {
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "PLAYING")]
    Playing,
    #[sea_orm(string_value = "FINISHED")]
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "join_code")]
    pub join_code: String,
    pub status: GameStatus,
    #[sea_orm(column_name = "round_count", column_type = "SmallInteger")]
    pub round_count: i16,
    #[sea_orm(column_name = "current_round", column_type = "SmallInteger")]
    pub current_round: i16,
    #[sea_orm(column_name = "max_players", column_type = "SmallInteger")]
    pub max_players: i16,
    #[sea_orm(column_name = "host_player_id")]
    pub host_player_id: Option<i64>,
    #[sea_orm(column_name = "leader_player_id")]
    pub leader_player_id: Option<i64>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::players::Entity")]
    Players,
    #[sea_orm(has_many = "super::rounds::Entity")]
    Rounds,
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
