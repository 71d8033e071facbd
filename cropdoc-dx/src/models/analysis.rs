//! Persisted diagnosis history record

use super::{ClassificationResult, Crop, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the `analyses` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub analysis_id: Uuid,
    pub user_id: String,
    /// Crop hint at the time of the request, or "unknown"
    pub crop_type: String,
    pub disease_prediction: String,
    pub status: Status,
    pub confidence: f64,
    pub severity: String,
    pub health_score: f64,
    pub is_healthy: bool,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn from_result(
        analysis_id: Uuid,
        user_id: impl Into<String>,
        crop_hint: Option<Crop>,
        result: &ClassificationResult,
    ) -> Self {
        Self {
            analysis_id,
            user_id: user_id.into(),
            crop_type: crop_hint.map_or("unknown", |c| c.as_str()).to_string(),
            disease_prediction: result.disease.clone(),
            status: result.status,
            confidence: result.confidence,
            severity: result.severity.clone(),
            health_score: result.health_score,
            is_healthy: result.is_healthy(),
            created_at: cropdoc_common::time::now(),
        }
    }
}
