use sea_orm::TransactionTrait;
use tracing::{debug, info, warn};

use super::rooms::RoomState;
use super::DraftCoordinator;
use crate::domain::types::{GameStatus, Side};
use crate::errors::domain::DomainError;
use crate::repos::{games, series};
use crate::ws::protocol::{DraftStart, ReadyStateUpdate, ReadyStates, ServerEvent};

impl DraftCoordinator {
    /// Record one side's readiness; starts the draft when both sides are ready.
    ///
    /// Signals for a game that has left PENDING are ignored, so repeated
    /// ready signals can never restart a running draft. Returns the
    /// readiness snapshot that was broadcast, if any.
    pub async fn set_ready(
        &self,
        game_id: &str,
        side: Side,
        is_ready: bool,
    ) -> Result<Option<ReadyStates>, DomainError> {
        let room = self.rooms.room(game_id);
        let mut state = room.lock().await;
        let result = self.set_ready_locked(game_id, side, is_ready, &mut state).await;
        self.rooms.release_if_idle(game_id, &room, &state);
        result
    }

    async fn set_ready_locked(
        &self,
        game_id: &str,
        side: Side,
        is_ready: bool,
        state: &mut RoomState,
    ) -> Result<Option<ReadyStates>, DomainError> {
        let game = self
            .bounded("find_game", games::require_game(&self.db, game_id))
            .await?;
        if game.status != GameStatus::Pending {
            debug!(
                game_id,
                status = game.status.as_str(),
                side = side.as_str(),
                "ignoring ready signal for started game"
            );
            return Ok(None);
        }

        let ready_states = {
            let readiness = state.readiness.get_or_insert_with(ReadyStates::default);
            readiness.set(side, is_ready);
            *readiness
        };

        self.broadcaster.to_room(
            game_id,
            ServerEvent::ReadyStateUpdate(ReadyStateUpdate {
                game_id: game_id.to_string(),
                ready_states,
            }),
        );

        if !ready_states.both_ready() {
            return Ok(Some(ready_states));
        }

        // Readiness stays in place until the start is durable.
        let db = &self.db;
        let series_id = game.series_id.clone();
        self.bounded("start_draft", async {
            let txn = db.begin().await?;
            games::update_status(&txn, game_id, GameStatus::InProgress).await?;
            if series::mark_in_progress(&txn, &series_id).await? {
                info!(series_id = %series_id, "series in progress");
            }
            txn.commit().await?;
            Ok::<(), DomainError>(())
        })
        .await
        .inspect_err(|e| warn!(game_id, error = %e, "failed to start draft"))?;

        state.readiness = None;
        self.timer.start(game_id, state);

        let start_time = (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        self.broadcaster.to_room(
            game_id,
            ServerEvent::DraftStart(DraftStart {
                game_id: game_id.to_string(),
                start_time,
            }),
        );
        info!(game_id, "draft started");

        Ok(Some(ready_states))
    }
}
