use sea_orm::TransactionTrait;
use tracing::{info, warn};

use super::rooms::RoomState;
use super::DraftCoordinator;
use crate::adapters::games_sea::GameCreate;
use crate::domain::series_rules::{next_step, GameResult, Progression, SeriesView};
use crate::domain::types::{GameStatus, Side};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::{self, Game};
use crate::repos::series::{self, Series};
use crate::ws::protocol::{GameCreated, GameUpdated, SeriesUpdated, ServerEvent};

/// What recording a winner led to.
#[derive(Debug, Clone, PartialEq)]
pub enum WinnerOutcome {
    NextGame { game: Game, next: Game },
    SeriesComplete { game: Game, series: Series },
}

impl DraftCoordinator {
    /// Record the winner of a drafted game and advance the series.
    pub async fn set_winner(&self, game_id: &str, winner: Side) -> Result<WinnerOutcome, DomainError> {
        let room = self.rooms.room(game_id);
        let mut state = room.lock().await;
        let result = self.set_winner_locked(game_id, winner, &mut state).await;
        self.rooms.release_if_idle(game_id, &room, &state);
        result
    }

    async fn set_winner_locked(
        &self,
        game_id: &str,
        winner: Side,
        state: &mut RoomState,
    ) -> Result<WinnerOutcome, DomainError> {

        let game = self
            .bounded("find_game", games::require_game(&self.db, game_id))
            .await?;
        if game.status != GameStatus::DraftComplete {
            return Err(DomainError::validation(
                ValidationKind::InvalidState,
                format!("Game is {}, not DRAFT_COMPLETE", game.status.as_str()),
            ));
        }

        let db = &self.db;
        let series_id = game.series_id.clone();
        let outcome = self
            .bounded("set_winner", async {
                let txn = db.begin().await?;
                let completed = games::set_winner(&txn, game_id, winner).await?;
                let series_row = series::require_series(&txn, &series_id).await?;
                let all_games = games::list_by_series(&txn, &series_id).await?;

                let view = SeriesView {
                    team1: &series_row.team1_name,
                    team2: &series_row.team2_name,
                    format: series_row.format,
                    scrim_block: series_row.scrim_block,
                };
                let results: Vec<GameResult<'_>> =
                    all_games.iter().filter_map(Game::result).collect();
                let last = GameResult {
                    blue_side: &completed.blue_side,
                    red_side: &completed.red_side,
                    winner,
                };

                let outcome = match next_step(&view, &results, &last, all_games.len()) {
                    Progression::NextGame {
                        game_number,
                        blue_side,
                        red_side,
                    } => {
                        let dto = GameCreate::new(ulid::Ulid::new().to_string(), &series_id, game_number)
                            .with_sides(blue_side, red_side);
                        let next = games::create_game(&txn, dto).await?;
                        WinnerOutcome::NextGame {
                            game: completed.clone(),
                            next,
                        }
                    }
                    Progression::Complete { winner } => {
                        let done = series::complete_series(&txn, &series_id, winner).await?;
                        WinnerOutcome::SeriesComplete {
                            game: completed.clone(),
                            series: done,
                        }
                    }
                };

                txn.commit().await?;
                Ok::<WinnerOutcome, DomainError>(outcome)
            })
            .await
            .inspect_err(|e| warn!(game_id, error = %e, "failed to record winner"))?;

        self.broadcaster.to_room(
            game_id,
            ServerEvent::GameUpdated(GameUpdated {
                game_id: game_id.to_string(),
                status: GameStatus::Completed,
                winner: Some(winner),
            }),
        );

        match &outcome {
            WinnerOutcome::NextGame { next, .. } => {
                info!(
                    game_id,
                    next_game_id = %next.id,
                    game_number = next.game_number,
                    "next game created"
                );
                self.broadcaster.to_all(ServerEvent::GameCreated(GameCreated {
                    game_id: next.id.clone(),
                    series_id: next.series_id.clone(),
                    game_number: next.game_number,
                    blue_side: next.blue_side.clone(),
                    red_side: next.red_side.clone(),
                }));
            }
            WinnerOutcome::SeriesComplete { series, .. } => {
                info!(
                    game_id,
                    series_id = %series.id,
                    winner = ?series.winner,
                    "series complete"
                );
                self.broadcaster.to_all(ServerEvent::SeriesUpdated(SeriesUpdated {
                    series_id: series.id.clone(),
                    status: series.status,
                    winner: series.winner,
                }));
            }
        }

        // Terminal for this game: drop its ephemeral state.
        self.timer.stop(game_id, state);
        state.readiness = None;
        self.rooms.remove(game_id);

        Ok(outcome)
    }
}
