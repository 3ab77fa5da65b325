//! TF-IDF Indexer.
//!
//! Turns a document's token stream into a sparse term-weight vector and
//! upserts it into the store keyed by path. Two weighting strategies exist:
//! the default computes TF-IDF per document in isolation, where every term's
//! document frequency is 1 and the weight collapses to plain term frequency.
//! Existing stores were built with that behavior, so it stays the default;
//! true corpus-wide IDF is an explicit opt-in.
//!
//! Vector ordering is reproducible: entries are sorted by descending weight
//! and equal weights keep first-occurrence order, so re-indexing unchanged
//! content yields an identical vector.

use anyhow::Result;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::db;
use crate::loader;
use crate::models::{CorpusFile, TermWeight};
use crate::tokenize::tokenize;

/// Term weighting strategy, selected by `[retrieval].weighting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    /// IDF over a corpus of one, so `weight == tf`. The default.
    PerDocument,
    /// True corpus-wide IDF: `weight = tf * (ln(N / df) + 1)`.
    CorpusIdf,
}

impl Weighting {
    pub fn parse(s: &str) -> Option<Weighting> {
        match s {
            "per-document" => Some(Weighting::PerDocument),
            "corpus-idf" => Some(Weighting::CorpusIdf),
            _ => None,
        }
    }
}

/// Document frequencies over a scanned corpus, for [`Weighting::CorpusIdf`].
pub struct CorpusStats {
    doc_count: usize,
    doc_freq: HashMap<String, usize>,
}

impl CorpusStats {
    pub fn idf(&self, term: &str) -> f64 {
        let df = self.doc_freq.get(term).copied().unwrap_or(0).max(1);
        (self.doc_count as f64 / df as f64).ln() + 1.0
    }
}

pub fn corpus_stats(files: &[CorpusFile]) -> CorpusStats {
    let mut doc_freq: HashMap<String, usize> = HashMap::new();
    for file in files {
        let mut seen: HashSet<String> = HashSet::new();
        for token in tokenize(&file.body) {
            seen.insert(token.to_lowercase());
        }
        for term in seen {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }
    CorpusStats {
        doc_count: files.len(),
        doc_freq,
    }
}

/// Build the sparse vector for one document's tokens.
///
/// Terms are lower-cased and unique within the vector. `stats` is required
/// only for [`Weighting::CorpusIdf`].
pub fn build_vector(
    tokens: &[String],
    weighting: Weighting,
    stats: Option<&CorpusStats>,
) -> Vec<TermWeight> {
    let mut entries: Vec<TermWeight> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for token in tokens {
        let term = token.to_lowercase();
        match index_of.get(&term) {
            Some(&i) => entries[i].count += 1,
            None => {
                index_of.insert(term.clone(), entries.len());
                entries.push(TermWeight {
                    term,
                    count: 1,
                    weight: 0.0,
                });
            }
        }
    }

    for entry in &mut entries {
        let idf = match (weighting, stats) {
            (Weighting::CorpusIdf, Some(s)) => s.idf(&entry.term),
            _ => 1.0,
        };
        entry.weight = entry.count as f64 * idf;
    }

    // Stable sort: equal weights keep first-occurrence order.
    entries.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

/// Batch index the corpus: scan, vectorize, upsert by path.
///
/// Unchanged files (same content hash) are skipped under per-document
/// weighting unless `full` is set. Corpus-wide IDF always recomputes every
/// document, since each stored weight depends on the whole corpus.
pub async fn run_index(config: &Config, full: bool) -> Result<()> {
    let weighting = Weighting::parse(&config.retrieval.weighting).ok_or_else(|| {
        anyhow::anyhow!("unknown retrieval.weighting: {}", config.retrieval.weighting)
    })?;

    let pool = db::connect(config).await?;
    let files = loader::scan_corpus(config)?;

    let stats = match weighting {
        Weighting::CorpusIdf => Some(corpus_stats(&files)),
        Weighting::PerDocument => None,
    };

    let mut upserted = 0u64;
    let mut skipped = 0u64;

    for file in &files {
        let content_hash = hash_content(&file.body);

        if !full && weighting == Weighting::PerDocument {
            let existing: Option<String> =
                sqlx::query_scalar("SELECT content_hash FROM documents WHERE path = ?")
                    .bind(&file.path)
                    .fetch_optional(&pool)
                    .await?;
            if existing.as_deref() == Some(content_hash.as_str()) {
                skipped += 1;
                continue;
            }
        }

        let tokens = tokenize(&file.body);
        let vector = build_vector(&tokens, weighting, stats.as_ref());
        upsert_document(&pool, file, &content_hash, &vector).await?;
        upserted += 1;
    }

    println!("index {}", config.corpus.root.display());
    println!("  files found: {}", files.len());
    println!("  documents upserted: {}", upserted);
    println!("  skipped (unchanged): {}", skipped);
    println!("ok");

    pool.close().await;
    Ok(())
}

async fn upsert_document(
    pool: &SqlitePool,
    file: &CorpusFile,
    content_hash: &str,
    vector: &[TermWeight],
) -> Result<()> {
    let vector_json = serde_json::to_string(vector)?;
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT INTO documents (path, file_name, title, source_url, crawled_at, content_hash, vector_json, indexed_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(path) DO UPDATE SET
            file_name = excluded.file_name,
            title = excluded.title,
            source_url = excluded.source_url,
            crawled_at = excluded.crawled_at,
            content_hash = excluded.content_hash,
            vector_json = excluded.vector_json,
            indexed_at = excluded.indexed_at
        "#,
    )
    .bind(&file.path)
    .bind(&file.file_name)
    .bind(&file.title)
    .bind(&file.source_url)
    .bind(file.crawled_at.map(|dt| dt.timestamp()))
    .bind(content_hash)
    .bind(&vector_json)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

fn hash_content(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn corpus_file(path: &str, body: &str) -> CorpusFile {
        CorpusFile {
            path: path.to_string(),
            file_name: path.to_string(),
            title: String::new(),
            source_url: None,
            crawled_at: None,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_per_document_weight_equals_tf() {
        let vector = build_vector(
            &toks(&["guard", "reentrancy", "guard", "Guard"]),
            Weighting::PerDocument,
            None,
        );
        assert_eq!(vector.len(), 2);
        assert_eq!(vector[0].term, "guard");
        assert_eq!(vector[0].count, 3);
        assert!((vector[0].weight - 3.0).abs() < 1e-12);
        assert_eq!(vector[1].term, "reentrancy");
        assert!((vector[1].weight - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_terms_are_unique_and_lowercased() {
        let vector = build_vector(
            &toks(&["Reentrancy", "REENTRANCY", "reentrancy"]),
            Weighting::PerDocument,
            None,
        );
        assert_eq!(vector.len(), 1);
        assert_eq!(vector[0].term, "reentrancy");
        assert_eq!(vector[0].count, 3);
    }

    #[test]
    fn test_sorted_descending_by_weight() {
        let vector = build_vector(
            &toks(&["a", "b", "b", "c", "c", "c"]),
            Weighting::PerDocument,
            None,
        );
        let weights: Vec<f64> = vector.iter().map(|t| t.weight).collect();
        assert_eq!(weights, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let vector = build_vector(
            &toks(&["zeta", "alpha", "mid", "mid"]),
            Weighting::PerDocument,
            None,
        );
        // "mid" (weight 2) first, then the weight-1 terms in document order.
        let terms: Vec<&str> = vector.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(terms, vec!["mid", "zeta", "alpha"]);
    }

    #[test]
    fn test_build_vector_idempotent() {
        let tokens = toks(&["one", "two", "two", "three", "one", "one"]);
        let v1 = build_vector(&tokens, Weighting::PerDocument, None);
        let v2 = build_vector(&tokens, Weighting::PerDocument, None);
        assert_eq!(v1, v2);
    }

    #[test]
    fn test_corpus_stats_document_frequencies() {
        let files = vec![
            corpus_file("a.md", "overflow overflow guard"),
            corpus_file("b.md", "guard modifier"),
            corpus_file("c.md", "modifier"),
        ];
        let stats = corpus_stats(&files);
        assert_eq!(stats.doc_count, 3);
        assert_eq!(stats.doc_freq.get("guard").copied(), Some(2));
        assert_eq!(stats.doc_freq.get("overflow").copied(), Some(1));
        assert_eq!(stats.doc_freq.get("modifier").copied(), Some(2));
    }

    #[test]
    fn test_corpus_idf_weights_rare_terms_higher() {
        let files = vec![
            corpus_file("a.md", "common rare"),
            corpus_file("b.md", "common"),
            corpus_file("c.md", "common"),
        ];
        let stats = corpus_stats(&files);
        let vector = build_vector(
            &toks(&["common", "rare"]),
            Weighting::CorpusIdf,
            Some(&stats),
        );
        // Both have tf = 1; "rare" appears in 1 of 3 documents so its idf is
        // ln(3) + 1 against ln(1) + 1 = 1 for "common".
        assert_eq!(vector[0].term, "rare");
        assert!((vector[0].weight - (3.0f64.ln() + 1.0)).abs() < 1e-12);
        assert_eq!(vector[1].term, "common");
        assert!((vector[1].weight - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighting_parse() {
        assert_eq!(Weighting::parse("per-document"), Some(Weighting::PerDocument));
        assert_eq!(Weighting::parse("corpus-idf"), Some(Weighting::CorpusIdf));
        assert_eq!(Weighting::parse("bm25"), None);
    }
}
