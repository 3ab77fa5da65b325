use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::index::Weighting;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    #[serde(default = "default_max_top_k")]
    pub max_top_k: usize,
    #[serde(default = "default_weighting")]
    pub weighting: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            max_top_k: default_max_top_k(),
            weighting: default_weighting(),
        }
    }
}

fn default_top_k() -> usize {
    5
}
fn default_max_top_k() -> usize {
    10
}
fn default_weighting() -> String {
    "per-document".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate corpus
    if config.corpus.include_globs.is_empty() {
        anyhow::bail!("corpus.include_globs must not be empty");
    }

    // Validate retrieval
    if config.retrieval.default_top_k < 1 {
        anyhow::bail!("retrieval.default_top_k must be >= 1");
    }
    if config.retrieval.max_top_k < config.retrieval.default_top_k {
        anyhow::bail!("retrieval.max_top_k must be >= retrieval.default_top_k");
    }
    if Weighting::parse(&config.retrieval.weighting).is_none() {
        anyhow::bail!(
            "Unknown retrieval.weighting: '{}'. Must be per-document or corpus-idf.",
            config.retrieval.weighting
        );
    }

    Ok(config)
}
