#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentStore, Filter, StoreError, StoredDocument};

/// In-process document store with the same observable semantics as `PgStore`.
/// Backs the unit tests; find order is insertion order.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<(Uuid, Value)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn field_eq(body: &Value, field: &str, expected: &str) -> bool {
    body.get(field).and_then(Value::as_str) == Some(expected)
}

fn matches(body: &Value, filter: &Filter) -> bool {
    for (field, value) in &filter.equals {
        if !field_eq(body, field, value) {
            return false;
        }
    }

    if let Some(city) = &filter.city_or_remote {
        let remote = matches!(
            body.get("mode").and_then(Value::as_str),
            Some("online" | "hybrid")
        );
        if !field_eq(body, "city", city) && !remote {
            return false;
        }
    }

    if let Some(q) = &filter.text {
        // Case-insensitive substring match over the same fields the
        // Postgres text index covers.
        let needle = q.to_lowercase();
        let hit = ["title", "description"].iter().any(|field| {
            body.get(*field)
                .and_then(Value::as_str)
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        });
        if !hit {
            return false;
        }
    }

    true
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, body: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push((id, body));
        Ok(id.to_string())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let collections = self.collections.read().await;
        let docs = collections
            .get(collection)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, body)| matches(body, filter))
                    .map(|(id, body)| StoredDocument {
                        id: id.to_string(),
                        body: body.clone(),
                    })
                    .take(limit.map(|n| n.max(0) as usize).unwrap_or(usize::MAX))
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<bool, StoreError> {
        let uuid = Uuid::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))?;

        let mut collections = self.collections.write().await;
        let Some(entries) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some((_, body)) = entries.iter_mut().find(|(doc_id, _)| *doc_id == uuid) else {
            return Ok(false);
        };

        if let (Value::Object(map), Value::Object(fields)) = (body, patch) {
            for (key, value) in fields {
                map.insert(key, value);
            }
        }
        Ok(true)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
