//! Application wiring.
//!
//! # Module Structure
//!
//! - `bootstrap`: Resolves settings and builds the analysis service
//! - `state`: Shared router state

mod bootstrap;
mod state;

pub use bootstrap::{Settings, build_service, load_settings, render_settings};
pub use state::AppState;
