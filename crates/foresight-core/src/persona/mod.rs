//! Persona domain module.
//!
//! The time portal lets a user talk to three versions of themselves. Each
//! persona carries a fixed viewpoint that flavors both model prompts and the
//! canned replies used in simulation mode.
//!
//! # Module Structure
//!
//! - `model`: The `Persona` enum and its viewpoint descriptions
//! - `preset`: Canned replies used when no model is available

mod model;
mod preset;

// Re-export public API
pub use model::Persona;
pub use preset::canned_replies;
