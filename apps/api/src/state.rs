use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::scoring::ScoringBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable scoring backend client; `HttpScoringClient` in production.
    pub scoring: Arc<dyn ScoringBackend>,
    pub config: Config,
}
