//! Recommendation engine.
//!
//! Loads a profile by email, filters published opportunities the user can
//! reach, scores them (interest overlap + deadline recency), and returns
//! them ranked. If the scored path fails for any reason, callers get an
//! unscored published list flagged with a note instead of an error.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::models::opportunity::{ModerationStatus, Opportunity};
use crate::models::profile::UserProfile;
use crate::recommendation::scoring::{interest_score, recency_score, total_score};
use crate::store::{DocumentStore, Filter, OPPORTUNITIES, PROFILES};

pub const DEFAULT_RECOMMEND_LIMIT: usize = 20;
pub const FALLBACK_NOTE: &str = "Fallback recommendations";

#[derive(Debug, Serialize)]
pub struct Recommendations {
    pub items: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Ranked recommendations for the profile registered under `email`.
pub async fn recommend(
    store: &dyn DocumentStore,
    email: &str,
    limit: usize,
) -> Result<Recommendations, AppError> {
    let profile = load_profile(store, email).await?;
    let interests: HashSet<String> = profile.interests.iter().cloned().collect();

    let mut eligible = published_filter();
    if let Some(location) = profile.location {
        // Users with a declared location see their own city plus anything
        // attendable remotely. No location means no location clause at all.
        eligible.city_or_remote = Some(location.as_str().to_string());
    }

    match scored_items(store, &eligible, &interests, limit).await {
        Ok(items) => Ok(Recommendations { items, note: None }),
        Err(err) => {
            // Degraded success: the scored path's failure stays here.
            warn!("scored recommendation query failed, serving unscored fallback: {err}");
            let docs = store
                .find(OPPORTUNITIES, &published_filter(), Some(limit as i64))
                .await?;
            Ok(Recommendations {
                items: docs.into_iter().map(|doc| doc.externalize()).collect(),
                note: Some(FALLBACK_NOTE.to_string()),
            })
        }
    }
}

async fn load_profile(store: &dyn DocumentStore, email: &str) -> Result<UserProfile, AppError> {
    // Email is not unique in the store; the first match wins.
    let docs = store
        .find(PROFILES, &Filter::default().with_eq("email", email), Some(1))
        .await?;
    let doc = docs
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("Profile for {email} not found")))?;
    serde_json::from_value(doc.body).map_err(|e| AppError::Internal(e.into()))
}

fn published_filter() -> Filter {
    Filter::default().with_eq("status", ModerationStatus::Published.as_str())
}

/// The scored path. Every failure here — store refusal, backend error, a
/// candidate that no longer deserializes — is recoverable by the caller.
async fn scored_items(
    store: &dyn DocumentStore,
    filter: &Filter,
    interests: &HashSet<String>,
    limit: usize,
) -> Result<Vec<Value>, anyhow::Error> {
    let docs = store.find(OPPORTUNITIES, filter, None).await?;

    let mut scored = Vec::with_capacity(docs.len());
    for doc in docs {
        let candidate: Opportunity = serde_json::from_value(doc.body.clone())?;
        let interest = interest_score(&candidate.tags, interests);
        let recency = recency_score(candidate.application_deadline);
        let total = total_score(interest, recency);

        let mut item = doc.externalize();
        if let Value::Object(map) = &mut item {
            map.insert("interest_score".to_string(), json!(interest));
            map.insert("recency_score".to_string(), json!(recency));
            map.insert("total_score".to_string(), json!(total));
        }
        scored.push((total, item));
    }

    // Stable sort: ties keep the store's own order.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    Ok(scored.into_iter().map(|(_, item)| item).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::{StoreError, StoredDocument};
    use async_trait::async_trait;
    use serde_json::json;

    async fn seed_profile(store: &dyn DocumentStore, profile: Value) {
        store.insert_one(PROFILES, profile).await.unwrap();
    }

    async fn seed_opportunity(store: &dyn DocumentStore, overrides: Value) -> String {
        let mut body = json!({
            "title": "Listing",
            "description": "A listing",
            "category": "hackathon",
            "country": "Saudi Arabia",
            "mode": "online",
            "is_paid": false,
            "url": "https://example.com/",
            "tags": [],
            "verified": true,
            "status": "published"
        });
        if let (Value::Object(base), Value::Object(extra)) = (&mut body, overrides) {
            for (k, v) in extra {
                base.insert(k, v);
            }
        }
        store.insert_one(OPPORTUNITIES, body).await.unwrap()
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let store = MemoryStore::new();
        let err = recommend(&store, "ghost@example.com", 20).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_interest_overlap_ranks_first() {
        let store = MemoryStore::new();
        seed_profile(
            &store,
            json!({"name": "A", "email": "a@x.com", "interests": ["AI", "robotics"]}),
        )
        .await;
        seed_opportunity(&store, json!({"title": "No overlap", "tags": ["web", "design"]})).await;
        seed_opportunity(&store, json!({"title": "One overlap", "tags": ["AI", "web"]})).await;

        let recs = recommend(&store, "a@x.com", 20).await.unwrap();
        assert!(recs.note.is_none());
        assert_eq!(recs.items[0]["title"], "One overlap");
        assert_eq!(recs.items[0]["interest_score"], 1);
        assert_eq!(recs.items[1]["interest_score"], 0);
    }

    #[tokio::test]
    async fn test_location_excludes_offline_elsewhere() {
        // Worked example: Riyadh profile; offline Jeddah listing drops out,
        // tag overlap ranks the rest.
        let store = MemoryStore::new();
        seed_profile(
            &store,
            json!({"name": "A", "email": "a@x.com", "interests": ["AI"], "location": "Riyadh"}),
        )
        .await;
        seed_opportunity(
            &store,
            json!({"title": "C1", "tags": ["AI"], "city": "Riyadh", "mode": "offline"}),
        )
        .await;
        seed_opportunity(
            &store,
            json!({"title": "C2", "tags": [], "city": "Jeddah", "mode": "online"}),
        )
        .await;
        seed_opportunity(
            &store,
            json!({"title": "C3", "tags": ["AI"], "city": "Jeddah", "mode": "offline"}),
        )
        .await;

        let recs = recommend(&store, "a@x.com", 20).await.unwrap();
        let titles: Vec<&str> = recs.items.iter().map(|i| i["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["C1", "C2"]);
    }

    #[tokio::test]
    async fn test_no_location_sees_every_mode() {
        let store = MemoryStore::new();
        seed_profile(&store, json!({"name": "A", "email": "a@x.com"})).await;
        seed_opportunity(&store, json!({"city": "Jeddah", "mode": "offline"})).await;
        seed_opportunity(&store, json!({"city": "Riyadh", "mode": "hybrid"})).await;
        seed_opportunity(&store, json!({"mode": "online"})).await;

        let recs = recommend(&store, "a@x.com", 20).await.unwrap();
        assert_eq!(recs.items.len(), 3);
    }

    #[tokio::test]
    async fn test_only_published_candidates_are_scored() {
        let store = MemoryStore::new();
        seed_profile(&store, json!({"name": "A", "email": "a@x.com"})).await;
        seed_opportunity(&store, json!({"title": "Live"})).await;
        seed_opportunity(&store, json!({"title": "Hidden", "status": "pending_review"})).await;

        let recs = recommend(&store, "a@x.com", 20).await.unwrap();
        assert_eq!(recs.items.len(), 1);
        assert_eq!(recs.items[0]["title"], "Live");
    }

    #[tokio::test]
    async fn test_later_deadline_outranks_on_equal_interest() {
        let store = MemoryStore::new();
        seed_profile(&store, json!({"name": "A", "email": "a@x.com"})).await;
        seed_opportunity(
            &store,
            json!({"title": "Near", "application_deadline": "2026-09-05T00:00:00Z"}),
        )
        .await;
        seed_opportunity(
            &store,
            json!({"title": "Far", "application_deadline": "2027-09-05T00:00:00Z"}),
        )
        .await;

        let recs = recommend(&store, "a@x.com", 20).await.unwrap();
        assert_eq!(recs.items[0]["title"], "Far");
    }

    #[tokio::test]
    async fn test_limit_truncates_ranked_list() {
        let store = MemoryStore::new();
        seed_profile(&store, json!({"name": "A", "email": "a@x.com", "interests": ["AI"]})).await;
        for i in 0..5 {
            seed_opportunity(&store, json!({"title": format!("L{i}")})).await;
        }
        seed_opportunity(&store, json!({"title": "Best", "tags": ["AI"]})).await;

        let recs = recommend(&store, "a@x.com", 2).await.unwrap();
        assert_eq!(recs.items.len(), 2);
        assert_eq!(recs.items[0]["title"], "Best");
    }

    #[tokio::test]
    async fn test_duplicate_emails_take_first_profile() {
        let store = MemoryStore::new();
        seed_profile(
            &store,
            json!({"name": "First", "email": "a@x.com", "interests": ["AI"]}),
        )
        .await;
        seed_profile(
            &store,
            json!({"name": "Second", "email": "a@x.com", "interests": ["design"]}),
        )
        .await;
        seed_opportunity(&store, json!({"title": "AI thing", "tags": ["AI"]})).await;
        seed_opportunity(&store, json!({"title": "Design thing", "tags": ["design"]})).await;

        let recs = recommend(&store, "a@x.com", 20).await.unwrap();
        assert_eq!(recs.items[0]["title"], "AI thing");
    }

    /// Store that refuses the scored path's uncapped candidate scan but
    /// serves bounded reads, simulating a backend without scan support.
    struct CappedStore(MemoryStore);

    #[async_trait]
    impl DocumentStore for CappedStore {
        async fn insert_one(&self, collection: &str, body: Value) -> Result<String, StoreError> {
            self.0.insert_one(collection, body).await
        }

        async fn find(
            &self,
            collection: &str,
            filter: &Filter,
            limit: Option<i64>,
        ) -> Result<Vec<StoredDocument>, StoreError> {
            if limit.is_none() {
                return Err(StoreError::Unsupported("unbounded scan".to_string()));
            }
            self.0.find(collection, filter, limit).await
        }

        async fn update_one(
            &self,
            collection: &str,
            id: &str,
            patch: Value,
        ) -> Result<bool, StoreError> {
            self.0.update_one(collection, id, patch).await
        }

        async fn ping(&self) -> Result<(), StoreError> {
            self.0.ping().await
        }
    }

    #[tokio::test]
    async fn test_fallback_on_scored_path_failure() {
        let store = CappedStore(MemoryStore::new());
        seed_profile(&store, json!({"name": "A", "email": "a@x.com", "interests": ["AI"]})).await;
        seed_opportunity(&store, json!({"title": "Live"})).await;
        seed_opportunity(&store, json!({"title": "Hidden", "status": "draft"})).await;

        let recs = recommend(&store, "a@x.com", 20).await.unwrap();
        assert_eq!(recs.note.as_deref(), Some(FALLBACK_NOTE));
        assert_eq!(recs.items.len(), 1);
        assert_eq!(recs.items[0]["status"], "published");
        assert!(recs.items[0].get("total_score").is_none());
    }
}
