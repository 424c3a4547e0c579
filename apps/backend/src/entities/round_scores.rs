use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "round_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "round_id")]
    pub round_id: i64,
    #[sea_orm(column_name = "player_id")]
    pub player_id: i64,
    #[sea_orm(column_name = "correct_guess_points")]
    pub correct_guess_points: i32,
    #[sea_orm(column_name = "fooled_points")]
    pub fooled_points: i32,
    #[sea_orm(column_name = "perfect_fake_points")]
    pub perfect_fake_points: i32,
    #[sea_orm(column_name = "winner_bonus")]
    pub winner_bonus: i32,
    #[sea_orm(column_name = "round_total")]
    pub round_total: i32,
    #[sea_orm(column_name = "total_after")]
    pub total_after: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rounds::Entity",
        from = "Column::RoundId",
        to = "super::rounds::Column::Id"
    )]
    Round,
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Round.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
