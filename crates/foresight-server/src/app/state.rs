//! Router state.

use foresight_application::AnalysisService;
use std::sync::Arc;

/// State shared by every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalysisService>,
}

impl AppState {
    pub fn new(service: AnalysisService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
