use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::catalog::handlers::CreatedResponse;
use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::recommendation::engine::{self, Recommendations, DEFAULT_RECOMMEND_LIMIT};
use crate::state::AppState;
use crate::store::PROFILES;

#[derive(Deserialize)]
pub struct RecommendQuery {
    pub limit: Option<usize>,
}

/// POST /profiles
pub async fn handle_create_profile(
    State(state): State<AppState>,
    Json(payload): Json<UserProfile>,
) -> Result<Json<CreatedResponse>, AppError> {
    let body = serde_json::to_value(&payload).map_err(|e| AppError::Internal(e.into()))?;
    let id = state.store.insert_one(PROFILES, body).await?;
    Ok(Json(CreatedResponse { id }))
}

/// GET /recommendations/:email
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(query): Query<RecommendQuery>,
) -> Result<Json<Recommendations>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_RECOMMEND_LIMIT);
    let recs = engine::recommend(state.store.as_ref(), &email, limit).await?;
    Ok(Json(recs))
}
