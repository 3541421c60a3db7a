//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it into
//! `crate::errors::domain::DomainError` here, and higher layers map
//! `DomainError` to `AppError` via `From`.

use sea_orm::DbErr;
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map a unique-constraint failure to a domain conflict.
///
/// SQLite reports `UNIQUE constraint failed: table.column[, table.column]`,
/// Postgres reports the index name with SQLSTATE 23505.
fn map_unique_violation(error_msg: &str) -> Option<DomainError> {
    let is_unique = error_msg.contains("UNIQUE constraint failed")
        || mentions_sqlstate(error_msg, "23505")
        || error_msg.contains("duplicate key value");
    if !is_unique {
        return None;
    }

    if error_msg.contains("draft_actions.champion")
        || error_msg.contains("idx_draft_actions_game_champion_unique")
    {
        return Some(DomainError::conflict(
            ConflictKind::ChampionUnavailable,
            "Champion already used in this game",
        ));
    }
    if error_msg.contains("draft_actions.position")
        || error_msg.contains("idx_draft_actions_game_position_unique")
    {
        return Some(DomainError::conflict(
            ConflictKind::UniqueViolation,
            "Turn already taken",
        ));
    }
    if error_msg.contains("games.game_number")
        || error_msg.contains("idx_games_series_number_unique")
    {
        return Some(DomainError::conflict(
            ConflictKind::UniqueViolation,
            "Game number already exists in series",
        ));
    }

    Some(DomainError::conflict(
        ConflictKind::UniqueViolation,
        "Unique constraint violated",
    ))
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        DbErr::ConnectionAcquire(_) => {
            warn!(error = %error_msg, "Database pool acquire failed");
            return DomainError::infra(InfraErrorKind::Timeout, "Database pool exhausted");
        }
        DbErr::Conn(_) => {
            warn!(error = %error_msg, "Database connection failed");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if let Some(conflict) = map_unique_violation(&error_msg) {
        warn!(error = %error_msg, "Unique constraint violation");
        return conflict;
    }

    error!(error = %error_msg, "Unhandled database error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), "Database error")
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}
