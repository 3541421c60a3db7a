//! Error codes for the draft backend.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP problem bodies and in websocket `actionRejected` events.

use core::fmt;

use serde::{Serialize, Serializer};

/// Centralized error codes for the draft backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General bad request error
    BadRequest,
    /// General validation error
    ValidationError,
    /// Team name empty or duplicated
    InvalidTeamName,
    /// Champion identifier missing or malformed
    InvalidChampion,
    /// Event targets a room the connection has not joined
    NotInRoom,

    // Draft state machine
    /// Game is not in the status the operation requires
    InvalidGameState,
    /// Submission does not match the expected turn
    OutOfTurn,
    /// Series has been blocked by moderation
    SeriesBlocked,

    // Resource Not Found
    /// Series not found
    SeriesNotFound,
    /// Game not found
    GameNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Champion already picked or banned in this game
    ChampionUnavailable,
    /// Champion already picked earlier in a fearless series
    FearlessViolation,
    /// Unique constraint violation
    UniqueViolation,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database call did not finish in time
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidTeamName => "INVALID_TEAM_NAME",
            Self::InvalidChampion => "INVALID_CHAMPION",
            Self::NotInRoom => "NOT_IN_ROOM",

            Self::InvalidGameState => "INVALID_GAME_STATE",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::SeriesBlocked => "SERIES_BLOCKED",

            Self::SeriesNotFound => "SERIES_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::ChampionUnavailable => "CHAMPION_UNAVAILABLE",
            Self::FearlessViolation => "FEARLESS_VIOLATION",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
