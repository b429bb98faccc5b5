//! Time Portal endpoints.

use super::non_blank;
use crate::app::AppState;
use crate::error::{ApiError, CHAT_FAILED, HISTORY_FAILED, INVALID_PERSONA, MISSING_MESSAGE};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use foresight_core::analysis::PersonaReply;
use foresight_core::persona::Persona;
use foresight_core::record::StoredRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaChatBody {
    #[serde(default)]
    message: Value,
    #[serde(default)]
    persona: Value,
    #[serde(default)]
    user_id: Value,
}

#[derive(Debug, Serialize)]
pub struct ChatHistory {
    pub messages: Vec<StoredRecord>,
}

/// The message is checked before the persona.
pub async fn persona(
    State(state): State<AppState>,
    body: Result<Json<PersonaChatBody>, JsonRejection>,
) -> Result<Json<PersonaReply>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("[ChatRoute] Rejected body: {rejection}");
        ApiError::rejected_body(rejection.status(), MISSING_MESSAGE)
    })?;

    let message = non_blank(&body.message).ok_or_else(|| ApiError::bad_request(MISSING_MESSAGE))?;
    let persona = body
        .persona
        .as_str()
        .and_then(|persona| Persona::from_str(persona).ok())
        .ok_or_else(|| ApiError::bad_request(INVALID_PERSONA))?;

    let reply = state
        .service
        .persona_chat(message, persona, body.user_id.as_str())
        .await
        .map_err(|e| ApiError::from_service(e, CHAT_FAILED))?;

    Ok(Json(reply))
}

pub async fn history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ChatHistory>, ApiError> {
    let messages = state
        .service
        .chat_history(&user_id)
        .await
        .map_err(|e| ApiError::from_service(e, HISTORY_FAILED))?;

    Ok(Json(ChatHistory { messages }))
}
