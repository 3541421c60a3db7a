//! SeaORM adapter for series - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::domain::types::{SeriesStatus, Side};
use crate::entities::series;

pub mod dto;

pub use dto::SeriesCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn create_series<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SeriesCreate,
) -> Result<series::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let model = series::ActiveModel {
        id: Set(dto.id),
        team1_name: Set(dto.team1_name),
        team2_name: Set(dto.team2_name),
        format: Set(dto.format),
        fearless_draft: Set(dto.fearless_draft),
        scrim_block: Set(dto.scrim_block),
        status: Set(SeriesStatus::Pending),
        winner: Set(None),
        team1_auth_token: Set(dto.team1_auth_token),
        team2_auth_token: Set(dto.team2_auth_token),
        is_blocked: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };
    model.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    series_id: &str,
) -> Result<Option<series::Model>, sea_orm::DbErr> {
    series::Entity::find_by_id(series_id.to_string())
        .one(conn)
        .await
}

/// Move a series from `from` to `to`; returns whether a row changed.
///
/// Conditional so concurrent starts of different games only flip it once.
pub async fn transition_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    series_id: &str,
    from: SeriesStatus,
    to: SeriesStatus,
) -> Result<bool, sea_orm::DbErr> {
    let result = series::Entity::update_many()
        .col_expr(series::Column::Status, Expr::value(to))
        .col_expr(
            series::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(series::Column::Id.eq(series_id))
        .filter(series::Column::Status.eq(from))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Mark the series COMPLETED with its winner and return the updated row.
pub async fn complete_series<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    series_id: &str,
    winner: Side,
) -> Result<series::Model, sea_orm::DbErr> {
    let result = series::Entity::update_many()
        .col_expr(series::Column::Status, Expr::value(SeriesStatus::Completed))
        .col_expr(series::Column::Winner, Expr::value(Some(winner)))
        .col_expr(
            series::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(series::Column::Id.eq(series_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(
            "Series not found".to_string(),
        ));
    }

    find_by_id(conn, series_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Series not found".to_string()))
}
