//! Core data models used throughout vulnkb.
//!
//! These types represent the corpus files, term vectors, and response shapes
//! that flow through the indexing and retrieval pipeline. The serialized
//! forms ([`SearchResponse`], [`ReadResponse`], [`ErrorResponse`]) are the
//! stable JSON contract consumed by external tool callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weighted term in a document's sparse vector.
///
/// `count` is the raw term frequency within the document; `weight` is the
/// stored retrieval weight (equal to `count` under per-document weighting,
/// `count * idf` under corpus-wide IDF).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermWeight {
    pub term: String,
    pub count: i64,
    pub weight: f64,
}

/// A corpus file after loading and metadata extraction, before indexing.
#[derive(Debug, Clone)]
pub struct CorpusFile {
    /// Path relative to the corpus root. Stable upsert key.
    pub path: String,
    pub file_name: String,
    /// First non-empty line with leading `#` markup stripped.
    pub title: String,
    /// From a `**Source URL:**` line, when present.
    pub source_url: Option<String>,
    /// From a `**Crawled on:**` line, normalized to a UTC instant.
    pub crawled_at: Option<DateTime<Utc>>,
    pub body: String,
}

/// One ranked entry in a search response.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResultItem {
    pub path: String,
    pub file_name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub score: f64,
}

/// Top-level search response: `{"results": [...]}`.
///
/// An empty `results` array is a successful answer (empty store, or no
/// document matched any query term), never an error.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultItem>,
}

/// Response for a document read-back.
#[derive(Debug, Clone, Serialize)]
pub struct ReadResponse {
    pub path: String,
    pub content: String,
}

/// Stable JSON error shape emitted at the process boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
