//! In-memory databases and app state for tests

use cropdoc_dx::services::{DiagnosisEngine, PreprocessOptions};
use cropdoc_dx::AppState;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Single-connection in-memory pool (every connection to `:memory:` is a
/// separate database, so the pool must never open a second one)
async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database")
}

/// In-memory database with the full schema
pub async fn create_test_db() -> SqlitePool {
    let pool = memory_pool().await;
    cropdoc_common::db::init_schema(&pool)
        .await
        .expect("create schema");
    pool
}

/// In-memory database without tables; every history write fails
pub async fn create_unmigrated_db() -> SqlitePool {
    memory_pool().await
}

pub async fn test_app_state() -> AppState {
    AppState::new(
        create_test_db().await,
        DiagnosisEngine::with_builtin_catalog(PreprocessOptions::default()),
    )
}
