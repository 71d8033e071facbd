//! Diagnosis history operations

use crate::models::{AnalysisRecord, Status};
use cropdoc_common::time::{from_storage, to_storage};
use cropdoc_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Upper bound on rows returned by one history query
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Append a diagnosis to the history
pub async fn insert_analysis(pool: &SqlitePool, record: &AnalysisRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO analyses (
            analysis_id, user_id, crop_type, disease_prediction, status,
            confidence, severity, health_score, is_healthy, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.analysis_id.to_string())
    .bind(&record.user_id)
    .bind(&record.crop_type)
    .bind(&record.disease_prediction)
    .bind(record.status.as_str())
    .bind(record.confidence)
    .bind(&record.severity)
    .bind(record.health_score)
    .bind(record.is_healthy)
    .bind(to_storage(&record.created_at))
    .execute(pool)
    .await?;

    Ok(())
}

/// Most recent analyses, newest first, optionally for one user
///
/// `limit` is clamped to [1, MAX_HISTORY_LIMIT].
pub async fn list_recent(
    pool: &SqlitePool,
    user_id: Option<&str>,
    limit: u32,
) -> Result<Vec<AnalysisRecord>> {
    let limit = i64::from(limit.clamp(1, MAX_HISTORY_LIMIT));

    let rows = sqlx::query(
        r#"
        SELECT analysis_id, user_id, crop_type, disease_prediction, status,
               confidence, severity, health_score, is_healthy, created_at
        FROM analyses
        WHERE (? IS NULL OR user_id = ?)
        ORDER BY created_at DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(record_from_row).collect()
}

/// One analysis by id
pub async fn get_analysis(pool: &SqlitePool, analysis_id: Uuid) -> Result<Option<AnalysisRecord>> {
    let row = sqlx::query(
        r#"
        SELECT analysis_id, user_id, crop_type, disease_prediction, status,
               confidence, severity, health_score, is_healthy, created_at
        FROM analyses
        WHERE analysis_id = ?
        "#,
    )
    .bind(analysis_id.to_string())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(record_from_row).transpose()
}

fn record_from_row(row: &SqliteRow) -> Result<AnalysisRecord> {
    let id: String = row.get("analysis_id");
    let analysis_id = Uuid::parse_str(&id)
        .map_err(|e| Error::CorruptRecord(format!("analysis_id '{}': {}", id, e)))?;

    let status: String = row.get("status");
    let status: Status = status
        .parse()
        .map_err(|e| Error::CorruptRecord(format!("analysis {}: {}", id, e)))?;

    let created_at: String = row.get("created_at");
    let created_at = from_storage(&created_at).ok_or_else(|| {
        Error::CorruptRecord(format!("analysis {}: bad timestamp '{}'", id, created_at))
    })?;

    Ok(AnalysisRecord {
        analysis_id,
        user_id: row.get("user_id"),
        crop_type: row
            .get::<Option<String>, _>("crop_type")
            .unwrap_or_else(|| "unknown".to_string()),
        disease_prediction: row.get("disease_prediction"),
        status,
        confidence: row.get("confidence"),
        severity: row.get("severity"),
        health_score: row.get("health_score"),
        is_healthy: row.get("is_healthy"),
        created_at,
    })
}
