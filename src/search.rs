//! Query Engine.
//!
//! Read-only top-k scoring over the stored term vectors. The query is
//! tokenized exactly like document bodies, lower-cased, and deduplicated; a
//! document's score is the sum of its stored weights for the query terms it
//! contains. Documents matching no query term are excluded, ordering is
//! deterministic (score descending, then path ascending), and the result is
//! truncated to the clamped top-k.
//!
//! Rows with unparseable stored vectors are skipped with a warning rather
//! than failing the query.

use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::db;
use crate::error::{report_and_exit, RetrievalError};
use crate::models::{SearchResponse, SearchResultItem, TermWeight};
use crate::tokenize::tokenize;

/// Clamp a requested result count into `[1, max_top_k]`.
pub fn clamp_top_k(requested: Option<usize>, default_top_k: usize, max_top_k: usize) -> usize {
    requested.unwrap_or(default_top_k).clamp(1, max_top_k)
}

/// Core search over the document store.
///
/// Returns an empty list (not an error) when the store is empty or nothing
/// matches. Rejects blank queries.
pub async fn search_documents(
    pool: &SqlitePool,
    config: &Config,
    query: &str,
    top_k: Option<usize>,
) -> Result<Vec<SearchResultItem>, RetrievalError> {
    let query_terms = query_terms(query)?;
    let k = clamp_top_k(
        top_k,
        config.retrieval.default_top_k,
        config.retrieval.max_top_k,
    );

    let rows = sqlx::query("SELECT path, file_name, title, source_url, vector_json FROM documents")
        .fetch_all(pool)
        .await?;

    let mut results: Vec<SearchResultItem> = Vec::new();
    for row in &rows {
        let path: String = row.get("path");
        let vector_json: String = row.get("vector_json");
        let vector: Vec<TermWeight> = match serde_json::from_str(&vector_json) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("warning: skipping {} (malformed stored vector: {})", path, e);
                continue;
            }
        };

        let score = score_vector(&vector, &query_terms);
        if score > 0.0 {
            results.push(SearchResultItem {
                path,
                file_name: row.get("file_name"),
                title: row.get("title"),
                source_url: row.get("source_url"),
                score,
            });
        }
    }

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.path.cmp(&b.path))
    });
    results.truncate(k);

    Ok(results)
}

/// Lower-cased, deduplicated query terms in first-occurrence order.
fn query_terms(query: &str) -> Result<Vec<String>, RetrievalError> {
    if query.trim().is_empty() {
        return Err(RetrievalError::Validation(
            "query must not be empty".to_string(),
        ));
    }
    let mut terms: Vec<String> = Vec::new();
    for token in tokenize(query) {
        let term = token.to_lowercase();
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    if terms.is_empty() {
        return Err(RetrievalError::Validation(
            "query contains no searchable terms".to_string(),
        ));
    }
    Ok(terms)
}

/// Sum of stored weights for the query terms present in the vector.
/// Every stored occurrence weighs at least 1, so any match scores > 0.
pub fn score_vector(vector: &[TermWeight], query_terms: &[String]) -> f64 {
    query_terms
        .iter()
        .map(|term| {
            vector
                .iter()
                .find(|tw| tw.term == *term)
                .map(|tw| tw.weight)
                .unwrap_or(0.0)
        })
        .sum()
}

/// CLI entry point for `vulnkb search`.
pub async fn run_search(
    config: &Config,
    query: &str,
    top_k: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    let outcome = search_documents(&pool, config, query, top_k).await;
    pool.close().await;

    let results = match outcome {
        Ok(results) => results,
        Err(err) => report_and_exit(&err, json),
    };

    if json {
        println!("{}", serde_json::to_string(&SearchResponse { results })?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        let title_display = if result.title.is_empty() {
            &result.file_name
        } else {
            &result.title
        };
        println!("{}. [{:.2}] {}", i + 1, result.score, title_display);
        println!("    path: {}", result.path);
        if let Some(ref url) = result.source_url {
            println!("    url: {}", url);
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(&str, f64)]) -> Vec<TermWeight> {
        entries
            .iter()
            .map(|(term, weight)| TermWeight {
                term: term.to_string(),
                count: 1,
                weight: *weight,
            })
            .collect()
    }

    #[test]
    fn test_score_sums_matched_terms() {
        let doc = vector(&[("reentrancy", 3.0), ("guard", 3.0), ("modifier", 3.0)]);
        let terms = vec!["reentrancy".to_string(), "guard".to_string()];
        assert!((score_vector(&doc, &terms) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_zero_when_no_term_matches() {
        let doc = vector(&[("overflow", 2.0)]);
        let terms = vec!["reentrancy".to_string()];
        assert_eq!(score_vector(&doc, &terms), 0.0);
    }

    #[test]
    fn test_ranking_scenario_both_terms_beat_one() {
        // Doc A: "reentrancy guard modifier" three times over.
        let doc_a = vector(&[("reentrancy", 3.0), ("guard", 3.0), ("modifier", 3.0)]);
        // Doc B: "reentrancy" once, "modifier" five times.
        let doc_b = vector(&[("modifier", 5.0), ("reentrancy", 1.0)]);

        let terms = vec!["reentrancy".to_string(), "guard".to_string()];
        assert!(score_vector(&doc_a, &terms) > score_vector(&doc_b, &terms));
    }

    #[test]
    fn test_clamp_top_k() {
        assert_eq!(clamp_top_k(None, 5, 10), 5);
        assert_eq!(clamp_top_k(Some(3), 5, 10), 3);
        assert_eq!(clamp_top_k(Some(50), 5, 10), 10);
        assert_eq!(clamp_top_k(Some(0), 5, 10), 1);
    }

    #[test]
    fn test_query_terms_deduplicated_and_lowercased() {
        let terms = query_terms("Guard guard GUARD reentrancy").unwrap();
        assert_eq!(terms, vec!["guard".to_string(), "reentrancy".to_string()]);
    }

    #[test]
    fn test_blank_query_rejected() {
        assert!(matches!(
            query_terms("   "),
            Err(RetrievalError::Validation(_))
        ));
        assert!(matches!(
            query_terms("!!! ---"),
            Err(RetrievalError::Validation(_))
        ));
    }
}
