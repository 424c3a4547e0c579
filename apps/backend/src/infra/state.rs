use crate::config::db::DbKind;
use crate::config::engine::EngineConfig;
use crate::error::AppError;
use crate::infra::db::{bootstrap_db, bootstrap_url};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    engine: EngineConfig,
    db_kind: Option<DbKind>,
    db_url: Option<String>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            engine: EngineConfig::default(),
            db_kind: None,
            db_url: None,
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    /// Explicit connection URL for `kind`, bypassing the environment.
    pub fn with_db_url(mut self, kind: DbKind, url: impl Into<String>) -> Self {
        self.db_kind = Some(kind);
        self.db_url = Some(url.into());
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        self.engine.validate()?;
        match (self.db_kind, self.db_url) {
            // single entrypoint: build + migrate
            (Some(kind), Some(url)) => Ok(AppState::new(bootstrap_url(kind, url).await?, self.engine)),
            (Some(kind), None) => Ok(AppState::new(bootstrap_db(kind).await?, self.engine)),
            (None, _) => {
                let mut state = AppState::without_db();
                state.engine = self.engine;
                Ok(state)
            }
        }
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
