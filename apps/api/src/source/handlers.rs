//! Axum route handlers for the cached job feed.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::JobRecord;
use crate::source::JobSource;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResetCacheResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobRecord>>, AppError> {
    Ok(Json(state.jobs.fetch_jobs().await?))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<JobRecord>, AppError> {
    state
        .jobs
        .fetch_jobs()
        .await?
        .into_iter()
        .find(|job| job.id == id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// GET /api/jobs/reset-cache
pub async fn handle_reset_cache(State(state): State<AppState>) -> Json<ResetCacheResponse> {
    state.jobs.reset().await;
    Json(ResetCacheResponse {
        success: true,
        message: "Jobs cache has been reset".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
