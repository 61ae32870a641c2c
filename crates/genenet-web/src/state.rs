//! Shared application state for the web server.

use std::sync::Arc;

use genenet_network::{AnalysisParams, Datasets};

/// Shared state injected into every Axum handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Reference tables, loaded once at startup and read-only afterwards.
    pub datasets: Arc<Datasets>,
    /// Analysis settings used when an upload does not override them.
    pub defaults: AnalysisParams,
}

impl AppState {
    pub fn new(datasets: Datasets, defaults: AnalysisParams) -> Self {
        Self { datasets: Arc::new(datasets), defaults }
    }
}

pub type SharedState = Arc<AppState>;
