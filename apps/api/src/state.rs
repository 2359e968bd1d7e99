use std::sync::Arc;

use crate::analysis::pipeline::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; requests share nothing mutable through it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analyzer: Arc<Analyzer>,
}
