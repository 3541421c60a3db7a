//! Draft action repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::draft_actions_sea as actions_adapter;
use crate::domain::types::{ActionType, Side};
use crate::entities::draft_actions;
use crate::errors::domain::DomainError;

/// One committed pick or ban, also the payload of `draftActionUpdate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftAction {
    pub id: String,
    pub game_id: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub phase: i16,
    pub team: Side,
    pub champion: String,
    pub position: i16,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
}

pub async fn create_action<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: actions_adapter::DraftActionCreate,
) -> Result<DraftAction, DomainError> {
    let action = actions_adapter::create_action(conn, dto).await?;
    Ok(DraftAction::from(action))
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Vec<DraftAction>, DomainError> {
    let actions = actions_adapter::list_by_game(conn, game_id).await?;
    Ok(actions.into_iter().map(DraftAction::from).collect())
}

pub async fn count_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<usize, DomainError> {
    let n = actions_adapter::count_by_game(conn, game_id).await?;
    Ok(n as usize)
}

/// Champions picked in earlier games of the series (fearless pool).
pub async fn picked_in_earlier_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    series_id: &str,
    game_number: i32,
) -> Result<Vec<String>, DomainError> {
    let picked = actions_adapter::picked_in_earlier_games(conn, series_id, game_number).await?;
    Ok(picked)
}

impl From<draft_actions::Model> for DraftAction {
    fn from(model: draft_actions::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            action_type: model.action_type,
            phase: model.phase,
            team: model.team,
            champion: model.champion,
            position: model.position,
            created_at: model.created_at,
        }
    }
}
