use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Which database backend to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    /// SQLite file at `SQLITE_DB_PATH`
    SqliteFile,
    /// Private in-memory SQLite; state is lost on restart
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DbKind::Postgres),
            "sqlite" | "sqlite-file" => Ok(DbKind::SqliteFile),
            "memory" | "sqlite-memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "Unsupported DB_KIND '{other}' (expected postgres, sqlite or memory)"
            ))),
        }
    }
}

impl fmt::Display for DbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DbKind::Postgres => "postgres",
            DbKind::SqliteFile => "sqlite",
            DbKind::SqliteMemory => "memory",
        };
        f.write_str(name)
    }
}

/// Read `DB_KIND` (defaults to `sqlite`).
pub fn db_kind_from_env() -> Result<DbKind, AppError> {
    match env::var("DB_KIND") {
        Ok(value) => value.parse(),
        Err(_) => Ok(DbKind::SqliteFile),
    }
}

/// Builds a database URL from environment variables for the given kind.
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = must_var("DRAFT_DB")?;
            let username = must_var("DRAFT_DB_USER")?;
            let password = must_var("DRAFT_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path = env::var("SQLITE_DB_PATH").unwrap_or_else(|_| "draft.db".to_string());
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
