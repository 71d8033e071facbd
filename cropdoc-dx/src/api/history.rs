//! Diagnosis history endpoints

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::analyses;
use crate::error::{ApiError, ApiResult};
use crate::models::AnalysisRecord;
use crate::AppState;

pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub analyses: Vec<AnalysisRecord>,
}

/// GET /api/history?user_id=..&limit=..
pub async fn list_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<Json<HistoryResponse>> {
    let Query(query) = query?;
    let user_id = query.user_id.as_deref().filter(|u| !u.trim().is_empty());
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let analyses = analyses::list_recent(&state.db, user_id, limit).await?;
    Ok(Json(HistoryResponse {
        count: analyses.len(),
        analyses,
    }))
}

/// GET /api/history/:analysis_id
pub async fn get_history_entry(
    State(state): State<AppState>,
    analysis_id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<AnalysisRecord>> {
    let Path(analysis_id) = analysis_id?;
    analyses::get_analysis(&state.db, analysis_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No analysis with id {}", analysis_id)))
}

pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/api/history", get(list_history))
        .route("/api/history/:analysis_id", get(get_history_entry))
}
