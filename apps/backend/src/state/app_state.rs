use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::engine::EngineConfig;
use crate::events::EventHub;
use crate::infra::locks::LockRegistry;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent only in handler tests that never touch it)
    db: Option<DatabaseConnection>,
    /// Round and game mutexes shared by every request in this process
    pub locks: Arc<LockRegistry>,
    pub events: Arc<EventHub>,
    pub engine: EngineConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, engine: EngineConfig) -> Self {
        Self {
            db: Some(db),
            locks: Arc::new(LockRegistry::new()),
            events: Arc::new(EventHub::new()),
            engine,
        }
    }

    pub fn without_db() -> Self {
        Self {
            db: None,
            locks: Arc::new(LockRegistry::new()),
            events: Arc::new(EventHub::new()),
            engine: EngineConfig::default(),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
