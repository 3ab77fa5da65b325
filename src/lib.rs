//! # vulnkb
//!
//! A local-first TF-IDF index and retrieval CLI for crawled vulnerability
//! knowledge bases (SWC Registry, OWASP SCWE, and similar article corpora).
//!
//! vulnkb reads a directory of crawled markdown documents, builds a sparse
//! term-weight vector per document, stores the vectors in SQLite keyed by
//! file path, and answers deterministic top-k queries over the stored
//! weights. The CLI doubles as the tool-invocation boundary for AI
//! assistants: `search` and `get` emit single JSON objects on stdout when
//! called with `--json`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────┐
//! │ Corpus dir   │──▶│   Indexer     │──▶│  SQLite   │
//! │ *.md files   │   │ TF / TF-IDF  │   │ vectors   │
//! └──────────────┘   └──────────────┘   └────┬─────┘
//!                                            │
//!                                            ▼
//!                                      ┌──────────┐
//!                                      │   CLI    │
//!                                      │ (vulnkb) │
//!                                      └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! vulnkb init                          # create database
//! vulnkb index                         # vectorize the corpus
//! vulnkb search "reentrancy guard"     # ranked results
//! vulnkb get swc/SWC-107.md            # full document text
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types and JSON response shapes |
//! | [`error`] | Error taxonomy for the adapter boundary |
//! | [`tokenize`] | Word tokenization |
//! | [`loader`] | Corpus directory scanning and metadata extraction |
//! | [`index`] | Term weighting and upsert-by-path indexing |
//! | [`search`] | Top-k query engine |
//! | [`get`] | Document read-back with corpus containment |
//! | [`corpus`] | Corpus root health report |
//! | [`stats`] | Index statistics |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod config;
pub mod corpus;
pub mod db;
pub mod error;
pub mod get;
pub mod index;
pub mod loader;
pub mod migrate;
pub mod models;
pub mod search;
pub mod stats;
pub mod tokenize;
