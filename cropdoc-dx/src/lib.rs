//! cropdoc-dx library interface
//!
//! Leaf diagnosis engine plus its HTTP boundary. The core pipeline lives in
//! [`services`] and [`models`] and has no I/O; [`api`] and [`db`] wrap it.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult, DiagnosisError, InputError};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use services::preprocessor::MAX_UPLOAD_BYTES;
use services::DiagnosisEngine;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

/// Multipart overhead allowed on top of the largest accepted image, so that
/// oversize uploads reach the preprocessor and get a proper input error
const BODY_LIMIT_HEADROOM: usize = 2 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// History database
    pub db: SqlitePool,
    /// Shared diagnosis pipeline (read-only catalog inside)
    pub engine: DiagnosisEngine,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Most recent swallowed failure, reported on /health
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(db: SqlitePool, engine: DiagnosisEngine) -> Self {
        Self {
            db,
            engine,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Remember a failure that was not surfaced to the caller
    pub async fn record_error(&self, message: impl Into<String>) {
        *self.last_error.write().await = Some(message.into());
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::detection_routes())
        .merge(api::catalog_routes())
        .merge(api::history_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + BODY_LIMIT_HEADROOM))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
