//! Application layer: the AI response pipeline.
//!
//! # Module Structure
//!
//! - `prompt`: Prompt templates per request kind
//! - `normalizer`: Turns free-text model output into typed results
//! - `fallback`: Canned results for simulation mode and failures
//! - `analysis_service`: The pipeline tying the above to a model and a store

pub mod analysis_service;
pub mod fallback;
pub mod normalizer;
pub mod prompt;

pub use analysis_service::{AnalysisService, parse_image_data};
pub use fallback::FallbackGenerator;
pub use normalizer::NormalizeError;
pub use prompt::PromptBuilder;
