//! Realtime draft coordination.
//!
//! All operations on one game (join replay, readiness, actions, winner and
//! timer ticks) run under that game's room lock, and every store call is
//! bounded by the configured timeout. State changes are committed before
//! anything is broadcast.

mod progression;
mod readiness;
pub mod rooms;
mod sequencer;
pub mod timer;

#[cfg(test)]
mod tests_coordinator;

use std::future::Future;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{debug, warn};
use uuid::Uuid;

pub use self::progression::WinnerOutcome;
pub use self::rooms::{RoomState, RoomTable};
pub use self::timer::TurnTimer;
use crate::config::draft::DraftConfig;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::ws::hub::{Broadcaster, ConnectionRegistry};
use crate::ws::protocol::{ReadyStateUpdate, ServerEvent, TimerUpdate};

pub struct DraftCoordinator {
    db: DatabaseConnection,
    rooms: Arc<RoomTable>,
    registry: Arc<ConnectionRegistry>,
    broadcaster: Arc<dyn Broadcaster>,
    timer: TurnTimer,
    config: DraftConfig,
}

impl DraftCoordinator {
    /// Coordinator delivering through the registry itself.
    pub fn new(db: DatabaseConnection, registry: Arc<ConnectionRegistry>, config: DraftConfig) -> Self {
        let broadcaster: Arc<dyn Broadcaster> = registry.clone();
        Self::with_broadcaster(db, registry, broadcaster, config)
    }

    /// Coordinator with an injected delivery capability.
    pub fn with_broadcaster(
        db: DatabaseConnection,
        registry: Arc<ConnectionRegistry>,
        broadcaster: Arc<dyn Broadcaster>,
        config: DraftConfig,
    ) -> Self {
        let rooms = Arc::new(RoomTable::new());
        let timer = TurnTimer::new(
            rooms.clone(),
            broadcaster.clone(),
            config.turn_seconds,
            config.tick,
        );
        Self {
            db,
            rooms,
            registry,
            broadcaster,
            timer,
            config,
        }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    pub fn rooms(&self) -> &Arc<RoomTable> {
        &self.rooms
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    /// Put a connection in the game's room and replay the room's ephemeral
    /// state to it.
    pub async fn join_game(&self, conn_id: Uuid, game_id: &str) {
        let Some(room) = self.rooms.existing(game_id) else {
            self.registry.join(conn_id, game_id);
            debug!(conn_id = %conn_id, game_id, "joined room without ephemeral state");
            return;
        };

        let state = room.lock().await;
        self.registry.join(conn_id, game_id);

        if let Some(ready_states) = state.readiness {
            self.broadcaster.to_connection(
                conn_id,
                ServerEvent::ReadyStateUpdate(ReadyStateUpdate {
                    game_id: game_id.to_string(),
                    ready_states,
                }),
            );
        }
        if let Some(timer) = state.timer.as_ref() {
            self.broadcaster.to_connection(
                conn_id,
                ServerEvent::TimerUpdate(TimerUpdate {
                    game_id: game_id.to_string(),
                    time_remaining: timer.remaining,
                }),
            );
        }
        debug!(conn_id = %conn_id, game_id, "joined room with replay");
    }

    /// Run a store operation under the configured timeout.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(op, timeout_ms = self.config.store_timeout.as_millis() as u64, "store call timed out");
                Err(DomainError::infra(
                    InfraErrorKind::Timeout,
                    format!("Store operation '{op}' timed out"),
                ))
            }
        }
    }
}
