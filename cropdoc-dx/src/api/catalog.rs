//! Read-only catalog browsing

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::models::CatalogEntry;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DiseaseListResponse {
    pub count: usize,
    /// Catalog order, which is also the tie-break order
    pub diseases: Vec<CatalogEntry>,
}

/// GET /api/diseases
pub async fn list_diseases(State(state): State<AppState>) -> Json<DiseaseListResponse> {
    let diseases = state.engine.catalog().entries().to_vec();
    Json(DiseaseListResponse {
        count: diseases.len(),
        diseases,
    })
}

/// GET /api/diseases/:name
pub async fn get_disease(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<CatalogEntry>> {
    state
        .engine
        .catalog()
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Disease '{}'", name)))
}

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/diseases", get(list_diseases))
        .route("/api/diseases/:name", get(get_disease))
}
