pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Catalog
        .route(
            "/opportunities",
            post(catalog::handle_create_opportunity).get(catalog::handle_list_opportunities),
        )
        .route(
            "/opportunities/:id/verify",
            post(catalog::handle_verify_opportunity),
        )
        // Profiles & recommendations
        .route("/profiles", post(recommendation::handle_create_profile))
        .route(
            "/recommendations/:email",
            get(recommendation::handle_recommendations),
        )
        .with_state(state)
}
