//! Document-store abstraction.
//!
//! The catalog and recommendation services talk to a `DocumentStore` trait
//! object carried in `AppState`, never to a concrete client. Production
//! wires `PgStore` (JSONB documents over Postgres); unit tests wire
//! `MemoryStore`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

/// Collection holding opportunity listings.
pub const OPPORTUNITIES: &str = "opportunity";
/// Collection holding user profiles.
pub const PROFILES: &str = "userprofile";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed document id '{0}'")]
    MalformedId(String),

    #[error("unsupported query: {0}")]
    Unsupported(String),

    #[error("store backend error: {0}")]
    Backend(#[from] sqlx::Error),
}

/// A stored document paired with its store-generated identifier.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub body: Value,
}

impl StoredDocument {
    /// Folds the generated identifier into the document under the external
    /// `"id"` key. Store-native identifiers never reach callers under any
    /// other name.
    pub fn externalize(self) -> Value {
        let mut body = self.body;
        if let Value::Object(map) = &mut body {
            map.insert("id".to_string(), json!(self.id));
        }
        body
    }
}

/// Conjunctive filter evaluated by a store against one collection.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Exact-match clauses on top-level string fields.
    pub equals: Vec<(&'static str, String)>,
    /// Free-text clause against the store's indexed text fields.
    pub text: Option<String>,
    /// Matches documents whose `city` equals the given value, or whose
    /// `mode` is online or hybrid.
    pub city_or_remote: Option<String>,
}

impl Filter {
    pub fn with_eq(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.equals.push((field, value.into()));
        self
    }
}

/// Collection-style storage: insert-one with a generated id, filtered find,
/// partial update by id. `limit: None` means no cap on the result set.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: &str, body: Value) -> Result<String, StoreError>;

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Merges `patch` into the matched document. Returns `false` when no
    /// document with that id exists.
    async fn update_one(&self, collection: &str, id: &str, patch: Value)
        -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
