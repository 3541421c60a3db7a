use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::types::{SeriesFormat, SeriesStatus, Side};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "series")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "team1_name")]
    pub team1_name: String,
    #[sea_orm(column_name = "team2_name")]
    pub team2_name: String,
    pub format: SeriesFormat,
    #[sea_orm(column_name = "fearless_draft")]
    pub fearless_draft: bool,
    #[sea_orm(column_name = "scrim_block")]
    pub scrim_block: bool,
    pub status: SeriesStatus,
    pub winner: Option<Side>,
    #[sea_orm(column_name = "team1_auth_token")]
    pub team1_auth_token: String,
    #[sea_orm(column_name = "team2_auth_token")]
    pub team2_auth_token: String,
    #[sea_orm(column_name = "is_blocked")]
    pub is_blocked: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::games::Entity")]
    Games,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Games.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
