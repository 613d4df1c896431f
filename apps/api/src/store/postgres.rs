use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use super::{DocumentStore, Filter, StoreError, StoredDocument};

/// Document store over a single Postgres JSONB table (see `db::ensure_schema`).
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert_one(&self, collection: &str, body: Value) -> Result<String, StoreError> {
        let id: Uuid =
            sqlx::query_scalar("INSERT INTO documents (collection, body) VALUES ($1, $2) RETURNING id")
                .bind(collection)
                .bind(&body)
                .fetch_one(&self.pool)
                .await?;
        Ok(id.to_string())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, body FROM documents WHERE collection = ");
        qb.push_bind(collection);

        for (field, value) in &filter.equals {
            qb.push(" AND body ->> ");
            qb.push_bind(*field);
            qb.push(" = ");
            qb.push_bind(value.as_str());
        }

        if let Some(city) = &filter.city_or_remote {
            qb.push(" AND (body ->> 'city' = ");
            qb.push_bind(city.as_str());
            qb.push(" OR body ->> 'mode' IN ('online', 'hybrid'))");
        }

        if let Some(q) = &filter.text {
            qb.push(
                " AND to_tsvector('english', \
                 coalesce(body ->> 'title', '') || ' ' || coalesce(body ->> 'description', '')) \
                 @@ plainto_tsquery('english', ",
            );
            qb.push_bind(q.as_str());
            qb.push(")");
        }

        // No ORDER BY: callers get the store's default order.
        if let Some(limit) = limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }

        let rows = qb.build().fetch_all(&self.pool).await?;

        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id")?;
            let body: Value = row.try_get("body")?;
            docs.push(StoredDocument {
                id: id.to_string(),
                body,
            });
        }
        Ok(docs)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<bool, StoreError> {
        let uuid = Uuid::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))?;

        // Single-statement JSONB merge; per-row atomicity is all we need.
        let result =
            sqlx::query("UPDATE documents SET body = body || $1 WHERE id = $2 AND collection = $3")
                .bind(&patch)
                .bind(uuid)
                .bind(collection)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
