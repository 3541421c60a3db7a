//! SeaORM adapter for draft actions - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::domain::types::ActionType;
use crate::entities::{draft_actions, games};

pub mod dto;

pub use dto::DraftActionCreate;

pub async fn create_action<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: DraftActionCreate,
) -> Result<draft_actions::Model, sea_orm::DbErr> {
    let model = draft_actions::ActiveModel {
        id: Set(dto.id),
        game_id: Set(dto.game_id),
        action_type: Set(dto.action_type),
        phase: Set(dto.phase),
        team: Set(dto.team),
        champion: Set(dto.champion),
        position: Set(dto.position),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    model.insert(conn).await
}

/// Committed actions of a game ordered by position.
pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Vec<draft_actions::Model>, sea_orm::DbErr> {
    draft_actions::Entity::find()
        .filter(draft_actions::Column::GameId.eq(game_id))
        .order_by_asc(draft_actions::Column::Position)
        .all(conn)
        .await
}

pub async fn count_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<u64, sea_orm::DbErr> {
    draft_actions::Entity::find()
        .filter(draft_actions::Column::GameId.eq(game_id))
        .count(conn)
        .await
}

/// Champions picked (not banned) in games of `series_id` numbered below
/// `before_game_number`.
pub async fn picked_in_earlier_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    series_id: &str,
    before_game_number: i32,
) -> Result<Vec<String>, sea_orm::DbErr> {
    draft_actions::Entity::find()
        .select_only()
        .column(draft_actions::Column::Champion)
        .join(JoinType::InnerJoin, draft_actions::Relation::Game.def())
        .filter(games::Column::SeriesId.eq(series_id))
        .filter(games::Column::GameNumber.lt(before_game_number))
        .filter(draft_actions::Column::ActionType.eq(ActionType::Pick))
        .into_tuple::<String>()
        .all(conn)
        .await
}
