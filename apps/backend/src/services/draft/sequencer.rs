use sea_orm::TransactionTrait;
use tracing::{debug, info, warn};

use super::rooms::RoomState;
use super::DraftCoordinator;
use crate::adapters::draft_actions_sea::DraftActionCreate;
use crate::domain::draft_order::{final_position, validate_turn, TurnClaim};
use crate::domain::types::{ActionType, GameStatus};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::draft_actions::{self, DraftAction};
use crate::repos::{games, series};
use crate::ws::protocol::{DraftActionRequest, DraftActionUpdate, GameUpdated, ServerEvent};

impl DraftCoordinator {
    /// Validate and record one pick or ban.
    ///
    /// On rejection nothing is written and nothing is broadcast.
    pub async fn submit_action(&self, req: DraftActionRequest) -> Result<DraftAction, DomainError> {
        let room = self.rooms.room(&req.game_id);
        let mut state = room.lock().await;
        let result = self.submit_locked(&req, &mut state).await;
        self.rooms.release_if_idle(&req.game_id, &room, &state);
        result
    }

    async fn submit_locked(
        &self,
        req: &DraftActionRequest,
        state: &mut RoomState,
    ) -> Result<DraftAction, DomainError> {
        let game_id = req.game_id.as_str();

        let game = self
            .bounded("find_game", games::require_game(&self.db, game_id))
            .await?;
        if game.status != GameStatus::InProgress {
            return Err(DomainError::validation(
                ValidationKind::InvalidState,
                format!("Game is {}, not IN_PROGRESS", game.status.as_str()),
            ));
        }

        let series = self
            .bounded("find_series", series::require_series(&self.db, &game.series_id))
            .await?;
        if series.is_blocked {
            return Err(DomainError::validation(
                ValidationKind::SeriesBlocked,
                "Series is blocked",
            ));
        }

        let champion = req.champion.trim();
        if champion.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidChampion,
                "Champion must not be empty",
            ));
        }

        let committed = self
            .bounded("list_actions", draft_actions::list_by_game(&self.db, game_id))
            .await?;

        let turn = validate_turn(
            series.format,
            committed.len(),
            TurnClaim {
                action: req.action_type,
                team: req.team,
                position: req.position,
            },
        )?;
        if req.phase != i32::from(turn.phase) {
            debug!(
                game_id,
                claimed = req.phase,
                expected = turn.phase,
                "client phase differs from turn table"
            );
        }

        if committed.iter().any(|a| a.champion == champion) {
            return Err(DomainError::conflict(
                ConflictKind::ChampionUnavailable,
                format!("{champion} was already picked or banned in this game"),
            ));
        }

        if series.fearless_draft && turn.action == ActionType::Pick {
            let earlier = self
                .bounded(
                    "fearless_pool",
                    draft_actions::picked_in_earlier_games(&self.db, &series.id, game.game_number),
                )
                .await?;
            if earlier.iter().any(|c| c == champion) {
                return Err(DomainError::conflict(
                    ConflictKind::FearlessViolation,
                    format!("{champion} was picked in an earlier game of this series"),
                ));
            }
        }

        let is_final = turn.position == final_position(series.format);
        let dto = DraftActionCreate {
            id: ulid::Ulid::new().to_string(),
            game_id: game_id.to_string(),
            action_type: turn.action,
            phase: i16::from(turn.phase),
            team: turn.team,
            champion: champion.to_string(),
            position: i16::from(turn.position),
        };

        // The terminal action and DRAFT_COMPLETE commit together.
        let db = &self.db;
        let action = self
            .bounded("record_action", async {
                let txn = db.begin().await?;
                let action = draft_actions::create_action(&txn, dto).await?;
                if is_final {
                    games::update_status(&txn, game_id, GameStatus::DraftComplete).await?;
                }
                txn.commit().await?;
                Ok::<DraftAction, DomainError>(action)
            })
            .await
            .inspect_err(|e| warn!(game_id, error = %e, "failed to record draft action"))?;

        debug!(
            game_id,
            position = action.position,
            team = action.team.as_str(),
            champion = %action.champion,
            "draft action recorded"
        );
        self.broadcaster.to_room(
            game_id,
            ServerEvent::DraftActionUpdate(DraftActionUpdate {
                game_id: game_id.to_string(),
                action: action.clone(),
            }),
        );

        if is_final {
            self.timer.stop(game_id, state);
            self.broadcaster.to_room(
                game_id,
                ServerEvent::GameUpdated(GameUpdated {
                    game_id: game_id.to_string(),
                    status: GameStatus::DraftComplete,
                    winner: None,
                }),
            );
            info!(game_id, "draft complete");
        } else {
            self.timer.reset(game_id, state);
        }

        Ok(action)
    }
}
