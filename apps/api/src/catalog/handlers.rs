use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::catalog::service::{self, ListParams, DEFAULT_LIST_LIMIT};
use crate::errors::AppError;
use crate::models::opportunity::{Category, Opportunity, SaudiCity};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub category: Option<Category>,
    pub city: Option<SaudiCity>,
    pub published_only: Option<bool>,
    pub q: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// POST /opportunities
pub async fn handle_create_opportunity(
    State(state): State<AppState>,
    Json(payload): Json<Opportunity>,
) -> Result<Json<CreatedResponse>, AppError> {
    let id = service::create(state.store.as_ref(), payload).await?;
    Ok(Json(CreatedResponse { id }))
}

/// GET /opportunities
pub async fn handle_list_opportunities(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let params = ListParams {
        category: query.category,
        city: query.city,
        published_only: query.published_only.unwrap_or(true),
        q: query.q,
        limit: query.limit.unwrap_or(DEFAULT_LIST_LIMIT),
    };
    let results = service::list(state.store.as_ref(), &params).await?;
    Ok(Json(results))
}

/// POST /opportunities/:id/verify
pub async fn handle_verify_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    service::verify(state.store.as_ref(), &id).await?;
    Ok(Json(json!({ "ok": true })))
}
