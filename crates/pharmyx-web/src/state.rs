//! Shared application state for the web server.

use std::sync::Arc;

use pharmyx_report::ReportPipeline;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub pipeline: ReportPipeline,
}

impl AppState {
    pub fn new(pipeline: ReportPipeline) -> Self {
        Self { pipeline }
    }
}

pub type SharedState = Arc<AppState>;
