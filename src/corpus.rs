use anyhow::Result;

use crate::config::Config;
use crate::loader;

/// Report the corpus root and how many files the configured globs match.
pub fn show_corpus(config: &Config) -> Result<()> {
    let root = &config.corpus.root;
    println!("corpus root: {}", root.display());

    if !root.exists() {
        println!("status:      MISSING");
        return Ok(());
    }

    let paths = loader::matching_paths(config)?;
    println!("status:      OK");
    println!("documents:   {}", paths.len());
    println!("includes:    {}", config.corpus.include_globs.join(", "));
    if !config.corpus.exclude_globs.is_empty() {
        println!("excludes:    {}", config.corpus.exclude_globs.join(", "));
    }

    Ok(())
}
