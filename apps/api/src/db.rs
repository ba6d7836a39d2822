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

/// Ensures the two ranking tables exist. A persisted ranking is a parent
/// summary row plus one detail row per candidate, keyed by a generated UUID.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rankings (
            id UUID PRIMARY KEY,
            position TEXT NOT NULL,
            file_count INT NOT NULL,
            algorithms TEXT[] NOT NULL,
            top_candidate TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ranking_details (
            id UUID PRIMARY KEY,
            ranking_id UUID NOT NULL REFERENCES rankings(id) ON DELETE CASCADE,
            filename TEXT NOT NULL,
            rank INT NOT NULL,
            scores JSONB NOT NULL,
            final_score DOUBLE PRECISION,
            extracted_skills TEXT[] NOT NULL DEFAULT '{}',
            file_info JSONB,
            error TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Ranking schema ensured");
    Ok(())
}
