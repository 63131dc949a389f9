pub mod analyze;
pub mod health;

use crate::config::Config;
use crate::pipeline::{ArtifactStore, Pipeline};
use axum::Router;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Arc<Pipeline>,
    pub artifacts: Arc<ArtifactStore>,
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(analyze::router())
}
