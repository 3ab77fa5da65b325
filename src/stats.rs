//! Index statistics.
//!
//! Summarizes the stored index: document count, vocabulary size, and average
//! vector length. Malformed stored vectors are counted and reported rather
//! than failing the command.

use anyhow::Result;
use sqlx::Row;
use std::collections::HashSet;

use crate::config::Config;
use crate::db;
use crate::models::TermWeight;

pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    let doc_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
        .fetch_one(&pool)
        .await?;

    let rows = sqlx::query("SELECT path, vector_json FROM documents")
        .fetch_all(&pool)
        .await?;

    let mut total_terms: u64 = 0;
    let mut vocabulary: HashSet<String> = HashSet::new();
    let mut malformed: u64 = 0;

    for row in &rows {
        let vector_json: String = row.get("vector_json");
        match serde_json::from_str::<Vec<TermWeight>>(&vector_json) {
            Ok(vector) => {
                total_terms += vector.len() as u64;
                for tw in vector {
                    vocabulary.insert(tw.term);
                }
            }
            Err(_) => {
                let path: String = row.get("path");
                eprintln!("warning: malformed stored vector for {}", path);
                malformed += 1;
            }
        }
    }

    let avg_terms = if doc_count > 0 {
        total_terms as f64 / doc_count as f64
    } else {
        0.0
    };

    println!("documents:         {}", doc_count);
    println!("total terms:       {}", total_terms);
    println!("distinct terms:    {}", vocabulary.len());
    println!("avg terms per doc: {:.1}", avg_terms);
    if malformed > 0 {
        println!("malformed vectors: {}", malformed);
    }
    println!("database:          {}", config.db.path.display());

    pool.close().await;
    Ok(())
}
