//! Series creation and read models.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapters::games_sea::GameCreate;
use crate::adapters::series_sea::SeriesCreate;
use crate::domain::team_names::validate_team_names;
use crate::domain::types::SeriesFormat;
use crate::errors::domain::DomainError;
use crate::repos::draft_actions::{self, DraftAction};
use crate::repos::games::{self, Game};
use crate::repos::series::{self, Series};
use crate::utils::side_token::generate_token_pair;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeriesRequest {
    pub team1_name: String,
    pub team2_name: String,
    pub format: SeriesFormat,
    #[serde(default)]
    pub fearless_draft: bool,
    #[serde(default)]
    pub scrim_block: bool,
}

/// Creation result; the only place the side tokens are handed out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSeries {
    #[serde(flatten)]
    pub series: Series,
    pub team1_auth_token: String,
    pub team2_auth_token: String,
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    #[serde(flatten)]
    pub game: Game,
    pub actions: Vec<DraftAction>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDetail {
    #[serde(flatten)]
    pub series: Series,
    pub games: Vec<GameDetail>,
}

#[derive(Default)]
pub struct SeriesService;

impl SeriesService {
    /// Create a series and its first game (team1 on blue) atomically.
    pub async fn create_series(
        &self,
        db: &DatabaseConnection,
        req: CreateSeriesRequest,
    ) -> Result<CreatedSeries, DomainError> {
        let (team1, team2) = validate_team_names(&req.team1_name, &req.team2_name)?;
        let (team1_token, team2_token) = generate_token_pair();
        let series_id = ulid::Ulid::new().to_string();

        let txn = db.begin().await?;
        let created = series::create_series(
            &txn,
            SeriesCreate::new(&series_id, &team1, &team2, req.format)
                .fearless(req.fearless_draft)
                .scrim_block(req.scrim_block)
                .with_tokens(team1_token, team2_token),
        )
        .await?;
        let first = games::create_game(
            &txn,
            GameCreate::new(ulid::Ulid::new().to_string(), &series_id, 1).with_sides(&team1, &team2),
        )
        .await?;
        txn.commit().await?;

        info!(
            series_id = %created.id,
            format = ?created.format,
            fearless = created.fearless_draft,
            scrim_block = created.scrim_block,
            "series created"
        );

        Ok(CreatedSeries {
            team1_auth_token: created.team1_auth_token.clone(),
            team2_auth_token: created.team2_auth_token.clone(),
            series: created,
            games: vec![first],
        })
    }

    /// Series with every game and each game's actions in draft order.
    pub async fn get_series_detail<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        series_id: &str,
    ) -> Result<SeriesDetail, DomainError> {
        let series = series::require_series(conn, series_id).await?;
        let game_rows = games::list_by_series(conn, series_id).await?;

        let mut games = Vec::with_capacity(game_rows.len());
        for game in game_rows {
            let actions = draft_actions::list_by_game(conn, &game.id).await?;
            games.push(GameDetail { game, actions });
        }

        Ok(SeriesDetail { series, games })
    }
}
