//! HTTP routes.
//!
//! # Module Structure
//!
//! - `health`: Liveness check
//! - `startup`: Startup idea analysis and stored analyses
//! - `design`: Design roasts and stored roasts
//! - `chat`: Persona chat and chat history

mod chat;
mod design;
mod health;
mod startup;

use crate::app::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::{get, post};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Request body ceiling; roast uploads carry base64 images.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/startup/analyze", post(startup::analyze))
        .route("/api/startup/analyses/{id}", get(startup::get_analysis))
        .route("/api/design/roast", post(design::roast))
        .route("/api/design/roasts/{id}", get(design::get_roast))
        .route("/api/chat/persona", post(chat::persona))
        .route("/api/chat/history/{user_id}", get(chat::history))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// A JSON string field with visible content.
fn non_blank(value: &Value) -> Option<&str> {
    value.as_str().filter(|text| !text.trim().is_empty())
}
