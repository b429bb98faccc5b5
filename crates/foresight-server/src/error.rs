//! HTTP error mapping.
//!
//! Every error body is `{"error": "<message>"}`. Client mistakes carry a
//! specific message; server failures carry the endpoint's generic message
//! while the detail goes to the log.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use foresight_core::ForesightError;
use serde_json::json;

pub const INVALID_IDEA: &str = "Please provide a valid startup idea";
pub const MISSING_MESSAGE: &str = "Please provide a message";
pub const INVALID_PERSONA: &str = "Please provide a valid persona (past, present, future)";
pub const INVALID_BODY: &str = "Invalid request body";
pub const BODY_TOO_LARGE: &str = "Request body too large";
pub const STARTUP_FAILED: &str = "Failed to analyze startup idea";
pub const ROAST_FAILED: &str = "Failed to analyze design";
pub const CHAT_FAILED: &str = "Failed to generate response";
pub const HISTORY_FAILED: &str = "Failed to load chat history";
pub const RECORD_FAILED: &str = "Failed to load record";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: message.into(),
        }
    }

    /// Maps an extractor rejection. Oversized bodies keep their 413; every
    /// other rejection becomes a 400 carrying `message`.
    pub fn rejected_body(status: StatusCode, message: &str) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::payload_too_large(BODY_TOO_LARGE);
        }
        Self::bad_request(message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Maps a service error, using `failure` as the message for 500s.
    pub fn from_service(err: ForesightError, failure: &str) -> Self {
        if err.is_validation() {
            tracing::debug!("[ApiError] Rejected request: {err}");
            return Self::bad_request(err.to_string());
        }
        if err.is_not_found() {
            return Self::not_found(err.to_string());
        }

        tracing::error!("[ApiError] {failure}: {err}");
        Self::internal(failure)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
