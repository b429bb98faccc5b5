//! Design Roast endpoints.

use crate::app::AppState;
use crate::error::{ApiError, INVALID_BODY, RECORD_FAILED, ROAST_FAILED};
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use foresight_application::parse_image_data;
use foresight_core::analysis::DesignRoast;
use foresight_core::record::StoredRecord;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastDesignBody {
    /// Raw base64 or a `data:` URL; absent means "no image"
    #[serde(default)]
    image_data: Value,
    #[serde(default)]
    user_id: Value,
}

/// The body is optional: an empty body, with or without a JSON content type,
/// is a request without an image.
pub async fn roast(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DesignRoast>, ApiError> {
    let bytes = body.map_err(|rejection| {
        tracing::debug!("[DesignRoute] Rejected body: {rejection}");
        ApiError::rejected_body(rejection.status(), INVALID_BODY)
    })?;
    let body = parse_body(&bytes)?;

    let image = parse_image_data(body.image_data.as_str());
    let roast = state
        .service
        .roast_design(image, body.user_id.as_str())
        .await
        .map_err(|e| ApiError::from_service(e, ROAST_FAILED))?;

    Ok(Json(roast))
}

pub async fn get_roast(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredRecord>, ApiError> {
    state
        .service
        .get_design_roast(&id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, RECORD_FAILED))
}

fn parse_body(bytes: &[u8]) -> Result<RoastDesignBody, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RoastDesignBody::default());
    }
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!("[DesignRoute] Unparsable body: {e}");
        ApiError::bad_request(INVALID_BODY)
    })
}
