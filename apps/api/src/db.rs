use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Bootstraps the single JSONB table backing the document store.
/// Idempotent; runs at every startup (no migration tooling in scope).
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            collection TEXT NOT NULL,
            body JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection)")
        .execute(pool)
        .await?;

    // Text index over the fields the `q` filter searches.
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS documents_text_idx ON documents USING GIN (
            to_tsvector('english',
                coalesce(body ->> 'title', '') || ' ' || coalesce(body ->> 'description', ''))
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Document store schema ready");
    Ok(())
}
