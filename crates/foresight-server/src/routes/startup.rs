//! Startup Lab endpoints.

use super::non_blank;
use crate::app::AppState;
use crate::error::{ApiError, INVALID_IDEA, RECORD_FAILED, STARTUP_FAILED};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use foresight_core::analysis::StartupAnalysis;
use foresight_core::record::StoredRecord;
use serde::Deserialize;
use serde_json::Value;

/// Fields are loosely typed so a non-string idea is reported as an invalid
/// idea rather than a body error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeStartupBody {
    #[serde(default)]
    idea: Value,
    #[serde(default)]
    user_id: Value,
}

pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeStartupBody>, JsonRejection>,
) -> Result<Json<StartupAnalysis>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("[StartupRoute] Rejected body: {rejection}");
        ApiError::rejected_body(rejection.status(), INVALID_IDEA)
    })?;
    let idea = non_blank(&body.idea).ok_or_else(|| ApiError::bad_request(INVALID_IDEA))?;

    let analysis = state
        .service
        .analyze_startup(idea, body.user_id.as_str())
        .await
        .map_err(|e| ApiError::from_service(e, STARTUP_FAILED))?;

    Ok(Json(analysis))
}

pub async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredRecord>, ApiError> {
    state
        .service
        .get_startup_analysis(&id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, RECORD_FAILED))
}
