//! Enumerations shared by the domain, the store and the wire protocol.
//!
//! Stored as short strings so one schema serves Postgres and SQLite.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One of the two draft positions within a game.
///
/// Actions and winners use `BLUE`/`RED`; readiness signals use the
/// lowercase forms, which are accepted as aliases.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    #[sea_orm(string_value = "BLUE")]
    #[serde(alias = "blue")]
    Blue,
    #[sea_orm(string_value = "RED")]
    #[serde(alias = "red")]
    Red,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Blue => "BLUE",
            Side::Red => "RED",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    #[sea_orm(string_value = "PICK")]
    Pick,
    #[sea_orm(string_value = "BAN")]
    Ban,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum SeriesFormat {
    #[sea_orm(string_value = "BO1")]
    #[serde(rename = "BO1")]
    Bo1,
    #[sea_orm(string_value = "BO3")]
    #[serde(rename = "BO3")]
    Bo3,
    #[sea_orm(string_value = "BO5")]
    #[serde(rename = "BO5")]
    Bo5,
}

impl SeriesFormat {
    /// Wins required to take the series.
    pub fn games_needed(self) -> u32 {
        match self {
            SeriesFormat::Bo1 => 1,
            SeriesFormat::Bo3 => 2,
            SeriesFormat::Bo5 => 3,
        }
    }

    /// Upper bound on games played in the series.
    pub fn max_games(self) -> u32 {
        match self {
            SeriesFormat::Bo1 => 1,
            SeriesFormat::Bo3 => 3,
            SeriesFormat::Bo5 => 5,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeriesStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

/// Game lifecycle; mirrors the draft state machine.
///
/// PENDING -> IN_PROGRESS -> DRAFT_COMPLETE -> COMPLETED. Only
/// IN_PROGRESS accepts draft actions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "DRAFT_COMPLETE")]
    DraftComplete,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

impl GameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Pending => "PENDING",
            GameStatus::InProgress => "IN_PROGRESS",
            GameStatus::DraftComplete => "DRAFT_COMPLETE",
            GameStatus::Completed => "COMPLETED",
        }
    }
}
