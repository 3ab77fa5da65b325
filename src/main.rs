//! # vulnkb CLI
//!
//! The `vulnkb` binary is the retrieval adapter for the knowledge-base
//! pipeline: it owns the process boundary that an AI tool layer calls into.
//! `search` and `get` emit a single JSON object on stdout with `--json`;
//! errors in that mode are marshaled as `{"error": code, "details": ...}`
//! with a non-zero exit code.
//!
//! ## Usage
//!
//! ```bash
//! vulnkb --config ./config/vulnkb.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `vulnkb init` | Create the SQLite database and run schema migrations |
//! | `vulnkb corpus` | Report the corpus root and matched file count |
//! | `vulnkb index` | Vectorize the corpus and upsert documents by path |
//! | `vulnkb search "<query>"` | Ranked top-k search over stored vectors |
//! | `vulnkb get <path>` | Raw text of an indexed document |
//! | `vulnkb stats` | Index statistics |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! vulnkb init --config ./config/vulnkb.toml
//!
//! # Index the crawled corpus
//! vulnkb index --config ./config/vulnkb.toml
//!
//! # Ranked search, human output
//! vulnkb search "reentrancy guard"
//!
//! # Tool-call form: single JSON object on stdout
//! vulnkb search "reentrancy guard" --top-k 3 --json
//! vulnkb get swc/SWC-107.md --json
//! ```

mod config;
mod corpus;
mod db;
mod error;
mod get;
mod index;
mod loader;
mod migrate;
mod models;
mod search;
mod stats;
mod tokenize;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vulnkb: a local-first TF-IDF index and retrieval CLI for crawled
/// vulnerability knowledge bases.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/vulnkb.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "vulnkb",
    about = "A TF-IDF index and retrieval CLI for crawled vulnerability knowledge bases",
    version,
    long_about = "vulnkb reads a directory of crawled markdown documents (SWC Registry, OWASP SCWE \
    and similar), stores a sparse term-weight vector per document in SQLite keyed by file path, \
    and answers deterministic top-k queries. With --json, search and get emit a single JSON \
    object on stdout for AI tool callers."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/vulnkb.toml`. The corpus root, database path,
    /// and retrieval settings are read from this file.
    #[arg(long, global = true, default_value = "./config/vulnkb.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the documents table. This
    /// command is idempotent; running it multiple times is safe.
    Init,

    /// Report the corpus root and matched file count.
    Corpus,

    /// Vectorize the corpus and upsert documents by path.
    ///
    /// Walks the corpus root for files matching the configured globs,
    /// extracts title and crawl metadata, computes term weights per the
    /// configured weighting strategy, and replaces each document's stored
    /// record. Unchanged files are skipped under per-document weighting.
    Index {
        /// Reindex every file, ignoring stored content hashes.
        #[arg(long)]
        full: bool,
    },

    /// Search indexed documents.
    ///
    /// Tokenizes the query like document bodies, scores every stored
    /// document by the sum of its matched term weights, and prints the
    /// top-k results in a deterministic order.
    Search {
        /// The search query string.
        query: String,

        /// Number of results to return. Clamped to the configured maximum.
        #[arg(long)]
        top_k: Option<usize>,

        /// Emit a single JSON object on stdout instead of human output.
        #[arg(long)]
        json: bool,
    },

    /// Print the raw text of an indexed document.
    ///
    /// The path is the store key: relative to the corpus root. Paths
    /// escaping the corpus root are rejected.
    Get {
        /// Document path relative to the corpus root.
        path: String,

        /// Emit `{"path", "content"}` as JSON on stdout.
        #[arg(long)]
        json: bool,
    },

    /// Print index statistics.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Corpus => {
            corpus::show_corpus(&cfg)?;
        }
        Commands::Index { full } => {
            index::run_index(&cfg, full).await?;
        }
        Commands::Search { query, top_k, json } => {
            search::run_search(&cfg, &query, top_k, json).await?;
        }
        Commands::Get { path, json } => {
            get::run_get(&cfg, &path, json)?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}
