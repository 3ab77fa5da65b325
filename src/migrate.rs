use anyhow::Result;

use crate::config::Config;
use crate::db;

/// Create the schema. Safe to run repeatedly.
///
/// `path` is the upsert key: one row per corpus file, relative to the corpus
/// root. The sparse term-weight vector is stored as a JSON array in
/// `vector_json`, ordered by descending weight.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            path         TEXT PRIMARY KEY,
            file_name    TEXT NOT NULL,
            title        TEXT NOT NULL,
            source_url   TEXT,
            crawled_at   INTEGER,
            content_hash TEXT NOT NULL,
            vector_json  TEXT NOT NULL,
            indexed_at   INTEGER NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_documents_indexed_at ON documents(indexed_at DESC)",
    )
    .execute(&pool)
    .await?;

    pool.close().await;
    Ok(())
}
