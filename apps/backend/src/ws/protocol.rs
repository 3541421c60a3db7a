//! Websocket wire format.
//!
//! Every frame is a JSON text message `{"event": "<name>", "data": {...}}`
//! with camelCase field names.

use serde::{Deserialize, Serialize};

use crate::domain::types::{ActionType, GameStatus, SeriesStatus, Side};
use crate::errors::ErrorCode;
use crate::repos::draft_actions::DraftAction;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    JoinGame(JoinGame),
    ReadyState(ReadyState),
    DraftAction(DraftActionRequest),
    SetWinner(SetWinner),
}

impl ClientEvent {
    pub fn game_id(&self) -> &str {
        match self {
            ClientEvent::JoinGame(m) => &m.game_id,
            ClientEvent::ReadyState(m) => &m.game_id,
            ClientEvent::DraftAction(m) => &m.game_id,
            ClientEvent::SetWinner(m) => &m.game_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGame {
    pub game_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyState {
    pub game_id: String,
    pub side: Side,
    pub is_ready: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftActionRequest {
    pub game_id: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Advisory; the stored phase comes from the turn table.
    #[serde(default)]
    pub phase: i32,
    pub team: Side,
    pub champion: String,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetWinner {
    pub game_id: String,
    pub winner: Side,
}

/// Both readiness flags; an unset side is omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadyStates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red: Option<bool>,
}

impl ReadyStates {
    pub fn set(&mut self, side: Side, is_ready: bool) {
        match side {
            Side::Blue => self.blue = Some(is_ready),
            Side::Red => self.red = Some(is_ready),
        }
    }

    pub fn both_ready(&self) -> bool {
        self.blue == Some(true) && self.red == Some(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    ReadyStateUpdate(ReadyStateUpdate),
    DraftStart(DraftStart),
    DraftActionUpdate(DraftActionUpdate),
    TimerUpdate(TimerUpdate),
    GameUpdated(GameUpdated),
    GameCreated(GameCreated),
    SeriesUpdated(SeriesUpdated),
    ActionRejected(ActionRejected),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::ReadyStateUpdate(_) => "readyStateUpdate",
            ServerEvent::DraftStart(_) => "draftStart",
            ServerEvent::DraftActionUpdate(_) => "draftActionUpdate",
            ServerEvent::TimerUpdate(_) => "timerUpdate",
            ServerEvent::GameUpdated(_) => "gameUpdated",
            ServerEvent::GameCreated(_) => "gameCreated",
            ServerEvent::SeriesUpdated(_) => "seriesUpdated",
            ServerEvent::ActionRejected(_) => "actionRejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyStateUpdate {
    pub game_id: String,
    pub ready_states: ReadyStates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftStart {
    pub game_id: String,
    /// Unix epoch milliseconds.
    pub start_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftActionUpdate {
    pub game_id: String,
    pub action: DraftAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerUpdate {
    pub game_id: String,
    pub time_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameUpdated {
    pub game_id: String,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCreated {
    pub game_id: String,
    pub series_id: String,
    pub game_number: i32,
    pub blue_side: String,
    pub red_side: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesUpdated {
    pub series_id: String,
    pub status: SeriesStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
}

/// Sent only to the connection whose request was refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRejected {
    pub game_id: Option<String>,
    pub code: ErrorCode,
    pub message: String,
}
