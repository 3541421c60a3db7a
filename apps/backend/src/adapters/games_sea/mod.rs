//! SeaORM adapter for games - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::types::{GameStatus, Side};
use crate::entities::games;

pub mod dto;

pub use dto::GameCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let model = games::ActiveModel {
        id: Set(dto.id),
        series_id: Set(dto.series_id),
        game_number: Set(dto.game_number),
        blue_side: Set(dto.blue_side),
        red_side: Set(dto.red_side),
        status: Set(GameStatus::Pending),
        winner: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    model.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id.to_string())
        .one(conn)
        .await
}

/// All games of a series ordered by game number.
pub async fn list_by_series<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    series_id: &str,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::SeriesId.eq(series_id))
        .order_by_asc(games::Column::GameNumber)
        .all(conn)
        .await
}

/// Helper: run a filtered update, fail with RecordNotFound when nothing
/// matched, then refetch.
async fn update_then_fetch<C, F>(
    conn: &C,
    game_id: &str,
    configure_update: F,
) -> Result<games::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<games::Entity>) -> sea_orm::UpdateMany<games::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(games::Entity::update_many())
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .filter(games::Column::Id.eq(game_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound("Game not found".to_string()));
    }

    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game not found".to_string()))
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    status: GameStatus,
) -> Result<games::Model, sea_orm::DbErr> {
    update_then_fetch(conn, game_id, |update| {
        update.col_expr(games::Column::Status, Expr::value(status))
    })
    .await
}

/// Record the winning side and mark the game COMPLETED.
pub async fn set_winner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    winner: Side,
) -> Result<games::Model, sea_orm::DbErr> {
    update_then_fetch(conn, game_id, |update| {
        update
            .col_expr(games::Column::Status, Expr::value(GameStatus::Completed))
            .col_expr(games::Column::Winner, Expr::value(Some(winner)))
    })
    .await
}
