use std::sync::Arc;

use crate::config::Config;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Document store seam. Production wires `PgStore`; tests use `MemoryStore`.
    pub store: Arc<dyn DocumentStore>,
    #[allow(dead_code)]
    pub config: Config,
}
