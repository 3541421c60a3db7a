use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::types::{GameStatus, Side};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "series_id")]
    pub series_id: String,
    #[sea_orm(column_name = "game_number")]
    pub game_number: i32,
    #[sea_orm(column_name = "blue_side")]
    pub blue_side: String,
    #[sea_orm(column_name = "red_side")]
    pub red_side: String,
    pub status: GameStatus,
    pub winner: Option<Side>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::series::Entity",
        from = "Column::SeriesId",
        to = "super::series::Column::Id"
    )]
    Series,
    #[sea_orm(has_many = "super::draft_actions::Entity")]
    DraftActions,
}

impl Related<super::series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Series.def()
    }
}

impl Related<super::draft_actions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DraftActions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
