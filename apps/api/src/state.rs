use std::sync::Arc;

use crate::config::Config;
use crate::matching::engine::TailoringEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Kept on state for future handlers; only `main` reads it today.
    #[allow(dead_code)]
    pub config: Config,
    /// The tailoring engine. Owns the score weights, selection policy, and
    /// the per-instance bounded vector cache.
    pub engine: Arc<TailoringEngine>,
}
