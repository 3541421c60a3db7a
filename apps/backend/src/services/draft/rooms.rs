//! Per-game ephemeral state and its lock.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::ws::protocol::ReadyStates;

#[derive(Debug)]
pub struct TimerState {
    pub remaining: u32,
    pub running: bool,
    pub(super) cancel: CancellationToken,
}

/// Everything held in memory for one game.
///
/// `readiness` exists from the first ready signal until the draft starts;
/// `timer` from draft start until the final action.
#[derive(Debug, Default)]
pub struct RoomState {
    pub readiness: Option<ReadyStates>,
    pub timer: Option<TimerState>,
}

impl RoomState {
    pub fn is_idle(&self) -> bool {
        self.readiness.is_none() && self.timer.is_none()
    }
}

pub type RoomHandle = Arc<Mutex<RoomState>>;

/// gameId -> room lock. Different games never contend.
#[derive(Default)]
pub struct RoomTable {
    rooms: DashMap<String, RoomHandle>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The room for `game_id`, created on first use.
    pub fn room(&self, game_id: &str) -> RoomHandle {
        if let Some(existing) = self.rooms.get(game_id) {
            return existing.clone();
        }
        self.rooms
            .entry(game_id.to_string())
            .or_default()
            .clone()
    }

    pub fn existing(&self, game_id: &str) -> Option<RoomHandle> {
        self.rooms.get(game_id).map(|r| r.clone())
    }

    /// Drop a room that holds no state, unless another caller still has
    /// its handle. `handle` is the caller's own clone.
    pub fn release_if_idle(&self, game_id: &str, handle: &RoomHandle, state: &RoomState) {
        if !state.is_idle() {
            return;
        }
        // Handles are only cloned under the shard lock `remove_if` holds.
        self.rooms
            .remove_if(game_id, |_, held| Arc::ptr_eq(held, handle) && Arc::strong_count(held) == 2);
    }

    /// Forget a room; any running timer must already be stopped.
    pub fn remove(&self, game_id: &str) {
        self.rooms.remove(game_id);
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
