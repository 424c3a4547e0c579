use bluff_backend::config::db::DbKind;
use bluff_backend::config::engine::EngineConfig;
use bluff_backend::infra::state::build_state;
use bluff_backend::AppState;

/// Fresh migrated in-memory database per call.
pub async fn test_state() -> AppState {
    test_state_with(EngineConfig::default()).await
}

pub async fn test_state_with(engine: EngineConfig) -> AppState {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_engine(engine)
        .build()
        .await
        .expect("build in-memory test state")
}
