//! Analysis domain module.
//!
//! Typed requests accepted by the AI pipeline and the three result shapes it
//! returns. Results are identical in shape whether they came from a model or
//! from the fallback pools.
//!
//! # Module Structure
//!
//! - `model`: Result shapes (`StartupAnalysis`, `DesignRoast`, `PersonaReply`)
//! - `request`: Pipeline input (`AnalysisRequest`, `InlineImage`)

mod model;
mod request;

// Re-export public API
pub use model::{
    AnalysisResult, DesignRoast, FEEDBACK_ITEM_COUNT, FeedbackItem, FeedbackKind,
    MARKET_FIT_RANGE, MAX_LIST_ITEMS, PersonaReply, SCORE_RANGE, StartupAnalysis,
};
pub use request::{AnalysisKind, AnalysisRequest, DEFAULT_IMAGE_MIME_TYPE, InlineImage};
