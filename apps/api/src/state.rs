use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::matching::pipeline::MatchingPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Built once at startup; holds the OCR backend and language analyzer.
    pub pipeline: Arc<MatchingPipeline>,
}
