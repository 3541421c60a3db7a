//! In-process connection registry and event fan-out.
//!
//! Each websocket connection registers an unbounded channel; the session
//! actor drains it. A connection is in at most one room at a time.

use dashmap::{DashMap, DashSet};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::ws::protocol::ServerEvent;

/// Delivery capability used by the draft coordinator.
///
/// Fire-and-forget: delivery failures to individual connections are dropped.
/// A multi-process deployment would put a pub/sub implementation behind
/// this trait.
pub trait Broadcaster: Send + Sync {
    /// Every connection currently in `room`.
    fn to_room(&self, room: &str, event: ServerEvent);
    /// Every registered connection regardless of room.
    fn to_all(&self, event: ServerEvent);
    /// A single connection.
    fn to_connection(&self, conn_id: Uuid, event: ServerEvent);
}

struct Connection {
    tx: UnboundedSender<ServerEvent>,
    room: Option<String>,
}

#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<Uuid, Connection>,
    rooms: DashMap<String, DashSet<Uuid>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and hand back the receiving end of its queue.
    pub fn register(&self, conn_id: Uuid) -> UnboundedReceiver<ServerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.insert(conn_id, Connection { tx, room: None });
        debug!(conn_id = %conn_id, "connection registered");
        rx
    }

    /// Put a connection into `room`, leaving whatever room it was in.
    ///
    /// Returns false for unknown connections.
    pub fn join(&self, conn_id: Uuid, room: &str) -> bool {
        let previous = match self.connections.get_mut(&conn_id) {
            Some(mut conn) => conn.room.replace(room.to_string()),
            None => return false,
        };

        if let Some(prev) = previous.as_deref() {
            if prev != room {
                self.remove_member(prev, conn_id);
            }
        }
        self.rooms
            .entry(room.to_string())
            .or_default()
            .insert(conn_id);

        debug!(conn_id = %conn_id, room, previous = ?previous, "connection joined room");
        true
    }

    /// Drop a connection entirely (disconnect).
    pub fn leave(&self, conn_id: Uuid) {
        if let Some((_, conn)) = self.connections.remove(&conn_id) {
            if let Some(room) = conn.room {
                self.remove_member(&room, conn_id);
            }
            debug!(conn_id = %conn_id, "connection left");
        }
    }

    pub fn room_of(&self, conn_id: Uuid) -> Option<String> {
        self.connections
            .get(&conn_id)
            .and_then(|conn| conn.room.clone())
    }

    pub fn room_size(&self, room: &str) -> usize {
        self.rooms.get(room).map(|m| m.len()).unwrap_or(0)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn remove_member(&self, room: &str, conn_id: Uuid) {
        self.rooms.remove_if(room, |_, members| {
            members.remove(&conn_id);
            members.is_empty()
        });
    }

    fn send(&self, conn_id: Uuid, event: ServerEvent) {
        if let Some(conn) = self.connections.get(&conn_id) {
            if conn.tx.send(event).is_err() {
                trace!(conn_id = %conn_id, "dropping event for closed connection");
            }
        }
    }
}

impl Broadcaster for ConnectionRegistry {
    fn to_room(&self, room: &str, event: ServerEvent) {
        // Snapshot members first; never hold a rooms guard while touching connections.
        let members: Vec<Uuid> = match self.rooms.get(room) {
            Some(members) => members.iter().map(|id| *id).collect(),
            None => return,
        };
        trace!(room, event = event.name(), recipients = members.len(), "broadcast to room");
        for conn_id in members {
            self.send(conn_id, event.clone());
        }
    }

    fn to_all(&self, event: ServerEvent) {
        let all: Vec<Uuid> = self.connections.iter().map(|entry| *entry.key()).collect();
        trace!(event = event.name(), recipients = all.len(), "broadcast to all");
        for conn_id in all {
            self.send(conn_id, event.clone());
        }
    }

    fn to_connection(&self, conn_id: Uuid, event: ServerEvent) {
        self.send(conn_id, event);
    }
}
