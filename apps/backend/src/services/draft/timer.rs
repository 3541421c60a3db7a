//! Turn countdown.
//!
//! One tick task per running timer. Each tick takes the room lock, so a
//! tick never interleaves with an action being processed for that game.
//! Reaching zero only stops the countdown; nothing is submitted.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::rooms::{RoomState, RoomTable, TimerState};
use crate::ws::hub::Broadcaster;
use crate::ws::protocol::{ServerEvent, TimerUpdate};

#[derive(Clone)]
pub struct TurnTimer {
    rooms: Arc<RoomTable>,
    broadcaster: Arc<dyn Broadcaster>,
    turn_seconds: u32,
    tick: Duration,
}

impl TurnTimer {
    pub fn new(
        rooms: Arc<RoomTable>,
        broadcaster: Arc<dyn Broadcaster>,
        turn_seconds: u32,
        tick: Duration,
    ) -> Self {
        Self {
            rooms,
            broadcaster,
            turn_seconds,
            tick,
        }
    }

    /// Restart the countdown at full length. Caller holds the room lock.
    pub fn start(&self, game_id: &str, state: &mut RoomState) {
        if let Some(old) = state.timer.take() {
            old.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        state.timer = Some(TimerState {
            remaining: self.turn_seconds,
            running: true,
            cancel: cancel.clone(),
        });

        debug!(game_id, seconds = self.turn_seconds, "turn timer started");
        tokio::spawn(self.clone().run(game_id.to_string(), cancel));
    }

    /// Same as `start`; invoked after every accepted action.
    pub fn reset(&self, game_id: &str, state: &mut RoomState) {
        self.start(game_id, state);
    }

    /// Cancel and forget the countdown. Caller holds the room lock.
    pub fn stop(&self, game_id: &str, state: &mut RoomState) {
        if let Some(timer) = state.timer.take() {
            timer.cancel.cancel();
            debug!(game_id, remaining = timer.remaining, "turn timer stopped");
        }
    }

    async fn run(self, game_id: String, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(self.tick) => {}
            }

            let Some(room) = self.rooms.existing(&game_id) else {
                return;
            };
            let mut state = room.lock().await;

            // A restart or stop may have happened while waiting for the lock.
            if cancel.is_cancelled() {
                return;
            }
            let Some(timer) = state.timer.as_mut() else {
                return;
            };

            timer.remaining = timer.remaining.saturating_sub(1);
            let remaining = timer.remaining;
            if remaining == 0 {
                timer.running = false;
            }

            trace!(game_id = %game_id, remaining, "timer tick");
            self.broadcaster.to_room(
                &game_id,
                ServerEvent::TimerUpdate(TimerUpdate {
                    game_id: game_id.clone(),
                    time_remaining: remaining,
                }),
            );

            if remaining == 0 {
                debug!(game_id = %game_id, "turn timer expired");
                return;
            }
        }
    }
}
