//! Series repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::series_sea as series_adapter;
use crate::domain::types::{SeriesFormat, SeriesStatus, Side};
use crate::entities::series;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Series domain model.
///
/// Auth tokens are carried but never serialized; the creation response
/// exposes them explicitly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: String,
    pub team1_name: String,
    pub team2_name: String,
    pub format: SeriesFormat,
    pub fearless_draft: bool,
    pub scrim_block: bool,
    pub status: SeriesStatus,
    pub winner: Option<Side>,
    #[serde(skip)]
    pub team1_auth_token: String,
    #[serde(skip)]
    pub team2_auth_token: String,
    pub is_blocked: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

pub async fn create_series<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: series_adapter::SeriesCreate,
) -> Result<Series, DomainError> {
    let series = series_adapter::create_series(conn, dto).await?;
    Ok(Series::from(series))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    series_id: &str,
) -> Result<Option<Series>, DomainError> {
    let series = series_adapter::find_by_id(conn, series_id).await?;
    Ok(series.map(Series::from))
}

/// Find series by ID or return NotFound.
pub async fn require_series<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    series_id: &str,
) -> Result<Series, DomainError> {
    find_by_id(conn, series_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Series,
            format!("Series {series_id} not found"),
        )
    })
}

/// PENDING -> IN_PROGRESS; a no-op for series already past PENDING.
pub async fn mark_in_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    series_id: &str,
) -> Result<bool, DomainError> {
    let changed = series_adapter::transition_status(
        conn,
        series_id,
        SeriesStatus::Pending,
        SeriesStatus::InProgress,
    )
    .await?;
    Ok(changed)
}

pub async fn complete_series<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    series_id: &str,
    winner: Side,
) -> Result<Series, DomainError> {
    let series = series_adapter::complete_series(conn, series_id, winner).await?;
    Ok(Series::from(series))
}

impl From<series::Model> for Series {
    fn from(model: series::Model) -> Self {
        Self {
            id: model.id,
            team1_name: model.team1_name,
            team2_name: model.team2_name,
            format: model.format,
            fearless_draft: model.fearless_draft,
            scrim_block: model.scrim_block,
            status: model.status,
            winner: model.winner,
            team1_auth_token: model.team1_auth_token,
            team2_auth_token: model.team2_auth_token,
            is_blocked: model.is_blocked,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
