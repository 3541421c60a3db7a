//! Websocket delivery: wire format, connection registry and sessions.

pub mod hub;
pub mod protocol;
pub mod session;
