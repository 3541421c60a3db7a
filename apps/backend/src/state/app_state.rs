use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::draft::DraftConfig;
use crate::services::draft::DraftCoordinator;
use crate::services::series::SeriesService;
use crate::ws::hub::ConnectionRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    registry: Arc<ConnectionRegistry>,
    coordinator: Arc<DraftCoordinator>,
    series: Arc<SeriesService>,
}

impl AppState {
    /// Wire the registry and coordinator around one database connection.
    pub fn new(db: DatabaseConnection, config: DraftConfig) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let coordinator = Arc::new(DraftCoordinator::new(db.clone(), registry.clone(), config));
        Self {
            db,
            registry,
            coordinator,
            series: Arc::new(SeriesService),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn registry(&self) -> Arc<ConnectionRegistry> {
        self.registry.clone()
    }

    pub fn coordinator(&self) -> Arc<DraftCoordinator> {
        self.coordinator.clone()
    }

    pub fn series(&self) -> &SeriesService {
        &self.series
    }

    pub fn draft_config(&self) -> &DraftConfig {
        self.coordinator.config()
    }
}
