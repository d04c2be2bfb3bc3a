use std::sync::Arc;

use beaconview_core::config::Config;
use beaconview_engine::AnalyticsEngine;

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// The engine is request-scoped and stateless; nothing here mutates
/// after startup, so the state is a plain bundle of cheap clones.
pub struct AppState {
    pub engine: AnalyticsEngine,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(engine: AnalyticsEngine, config: Config) -> Self {
        Self {
            engine,
            config: Arc::new(config),
        }
    }
}
