//! Disease detection endpoint
//!
//! POST /api/disease/detect (multipart)
//! - `file`: the leaf image (required)
//! - `crop`: explicit crop, overrides the filename hint (optional)
//!
//! An `x-user-id` header identifies the caller; only identified requests are
//! written to history. The history write runs detached and never delays or
//! fails the response.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db::analyses;
use crate::error::{ApiError, ApiResult};
use crate::models::{AnalysisRecord, ClassificationResult, Crop, FeatureVector};
use crate::services::crop_hint;
use crate::AppState;

/// Header carrying the caller identity
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub analysis_id: Uuid,
    pub crop_hint: Option<Crop>,
    pub result: ClassificationResult,
    pub features: FeatureVector,
}

struct Upload {
    bytes: axum::body::Bytes,
    content_type: String,
    filename: Option<String>,
}

/// POST /api/disease/detect
pub async fn detect_disease(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<DetectResponse>> {
    let mut multipart = multipart?;
    let mut upload = None;
    let mut explicit_crop = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().map(str::to_string);
                // A missing part content type fails validation as "not an image"
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                upload = Some(Upload {
                    bytes,
                    content_type,
                    filename,
                });
            }
            "crop" => explicit_crop = Some(field.text().await?),
            other => debug!(field = other, "Ignoring multipart field"),
        }
    }

    let upload = upload.ok_or_else(|| ApiError::BadRequest("Missing 'file' field".into()))?;
    let hint = crop_hint::resolve(explicit_crop.as_deref(), upload.filename.as_deref());
    info!(
        filename = upload.filename.as_deref().unwrap_or(""),
        content_type = %upload.content_type,
        size = upload.bytes.len(),
        crop_hint = hint.map(|c| c.as_str()),
        "Disease detection requested"
    );

    let engine = state.engine.clone();
    let diagnosis = tokio::task::spawn_blocking(move || {
        engine.diagnose(&upload.bytes, &upload.content_type, hint)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Diagnosis task failed: {}", e)))??;

    let analysis_id = Uuid::new_v4();
    if let Some(user_id) = caller_identity(&headers) {
        let record = AnalysisRecord::from_result(analysis_id, user_id, hint, &diagnosis.result);
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = analyses::insert_analysis(&state.db, &record).await {
                warn!(analysis_id = %record.analysis_id, "Failed to record analysis: {}", e);
                state
                    .record_error(format!("history write failed: {}", e))
                    .await;
            }
        });
    }

    Ok(Json(DetectResponse {
        analysis_id,
        crop_hint: hint,
        result: diagnosis.result,
        features: diagnosis.features,
    }))
}

fn caller_identity(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn detection_routes() -> Router<AppState> {
    Router::new().route("/api/disease/detect", post(detect_disease))
}
