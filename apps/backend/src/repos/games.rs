//! Game repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::games_sea as games_adapter;
use crate::domain::series_rules::GameResult;
use crate::domain::types::{GameStatus, Side};
use crate::entities::games;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Game domain model, also the payload of `gameUpdated`/`gameCreated`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub series_id: String,
    pub game_number: i32,
    pub blue_side: String,
    pub red_side: String,
    pub status: GameStatus,
    pub winner: Option<Side>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

impl Game {
    /// View used by the progression rules; `None` until a winner is set.
    pub fn result(&self) -> Option<GameResult<'_>> {
        if self.status != GameStatus::Completed {
            return None;
        }
        self.winner.map(|winner| GameResult {
            blue_side: &self.blue_side,
            red_side: &self.red_side,
            winner,
        })
    }
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: games_adapter::GameCreate,
) -> Result<Game, DomainError> {
    let game = games_adapter::create_game(conn, dto).await?;
    Ok(Game::from(game))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

/// Find game by ID or return NotFound.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found")))
}

pub async fn list_by_series<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    series_id: &str,
) -> Result<Vec<Game>, DomainError> {
    let games = games_adapter::list_by_series(conn, series_id).await?;
    Ok(games.into_iter().map(Game::from).collect())
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    status: GameStatus,
) -> Result<Game, DomainError> {
    let game = games_adapter::update_status(conn, game_id, status).await?;
    Ok(Game::from(game))
}

pub async fn set_winner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    winner: Side,
) -> Result<Game, DomainError> {
    let game = games_adapter::set_winner(conn, game_id, winner).await?;
    Ok(Game::from(game))
}

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            series_id: model.series_id,
            game_number: model.game_number,
            blue_side: model.blue_side,
            red_side: model.red_side,
            status: model.status,
            winner: model.winner,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
