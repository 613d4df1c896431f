use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Liveness banner for uptime probes.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Dalilah backend is running"
    }))
}

/// GET /health
/// Service status plus document-store connectivity.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(_) => "unavailable",
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "dalilah-api",
        "database": database,
    }))
}
