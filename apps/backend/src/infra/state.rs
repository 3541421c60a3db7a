use crate::config::db::DbKind;
use crate::config::draft::DraftConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for AppState, used by `main.rs` and the integration tests.
pub struct StateBuilder {
    db_kind: DbKind,
    draft_config: DraftConfig,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_kind: DbKind::SqliteMemory,
            draft_config: DraftConfig::default(),
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = kind;
        self
    }

    pub fn with_draft_config(mut self, config: DraftConfig) -> Self {
        self.draft_config = config;
        self
    }

    /// Connect, migrate and wire the coordinator.
    pub async fn build(self) -> Result<AppState, AppError> {
        let conn = bootstrap_db(self.db_kind).await?;
        Ok(AppState::new(conn, self.draft_config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
