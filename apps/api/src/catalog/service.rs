//! Catalog service — opportunity lifecycle over the document store.
//!
//! Three operations: `create` (moderation-status forcing), `list`
//! (filtered read), `verify` (the single publish transition). No update
//! or delete beyond that.

use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::models::opportunity::{Category, ModerationStatus, Opportunity, SaudiCity};
use crate::store::{DocumentStore, Filter, OPPORTUNITIES};

pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Filters accepted by `list`.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub category: Option<Category>,
    pub city: Option<SaudiCity>,
    pub published_only: bool,
    pub q: Option<String>,
    pub limit: i64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            category: None,
            city: None,
            published_only: true,
            q: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// Persists a new opportunity and returns its generated id.
///
/// Submissions queue for review unless they arrive verified; any
/// caller-supplied status is discarded.
pub async fn create(store: &dyn DocumentStore, mut record: Opportunity) -> Result<String, AppError> {
    record.validate()?;

    record.status = if record.verified {
        ModerationStatus::Published
    } else {
        ModerationStatus::PendingReview
    };

    let body = serde_json::to_value(&record).map_err(|e| AppError::Internal(e.into()))?;
    let id = store.insert_one(OPPORTUNITIES, body).await?;
    info!(%id, status = record.status.as_str(), "opportunity created");
    Ok(id)
}

fn list_filter(params: &ListParams) -> Filter {
    let mut filter = Filter::default();
    if params.published_only {
        filter = filter.with_eq("status", ModerationStatus::Published.as_str());
    }
    if let Some(category) = params.category {
        filter = filter.with_eq("category", category.as_str());
    }
    if let Some(city) = params.city {
        filter = filter.with_eq("city", city.as_str());
    }
    filter.text = params.q.clone();
    filter
}

/// Lists opportunities matching the given filters, ids remapped to the
/// external `"id"` field. Order is the store's default.
pub async fn list(store: &dyn DocumentStore, params: &ListParams) -> Result<Vec<Value>, AppError> {
    let docs = store
        .find(OPPORTUNITIES, &list_filter(params), Some(params.limit))
        .await?;
    Ok(docs.into_iter().map(|doc| doc.externalize()).collect())
}

/// Marks an opportunity verified and published. Idempotent: re-verifying
/// an already-published record succeeds and leaves the same end state.
pub async fn verify(store: &dyn DocumentStore, id: &str) -> Result<(), AppError> {
    let patch = json!({
        "verified": true,
        "status": ModerationStatus::Published.as_str(),
    });

    let matched = store.update_one(OPPORTUNITIES, id, patch).await?;
    if !matched {
        return Err(AppError::NotFound(format!("Opportunity {id} not found")));
    }

    info!(%id, "opportunity verified and published");
    Ok(())
}
