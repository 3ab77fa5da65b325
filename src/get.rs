//! Document read-back.
//!
//! Returns the raw text of a previously indexed document. Paths are resolved
//! against the corpus root and anything escaping it is rejected before the
//! filesystem is touched; symlinks are caught by a second check on the
//! canonicalized path.

use std::path::{Component, Path, PathBuf};

use crate::config::Config;
use crate::error::{report_and_exit, RetrievalError};
use crate::models::ReadResponse;

/// Read a corpus document by its store key (path relative to the corpus root).
pub fn read_document(config: &Config, relative: &str) -> Result<ReadResponse, RetrievalError> {
    let resolved = resolve_in_corpus(&config.corpus.root, relative)?;

    let content = std::fs::read_to_string(&resolved).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            RetrievalError::NotFound(format!("no document at {}", relative))
        }
        _ => RetrievalError::Io(e),
    })?;

    Ok(ReadResponse {
        path: relative.to_string(),
        content,
    })
}

fn resolve_in_corpus(root: &Path, relative: &str) -> Result<PathBuf, RetrievalError> {
    let rel = Path::new(relative);

    if rel.as_os_str().is_empty() {
        return Err(RetrievalError::Validation(
            "path must not be empty".to_string(),
        ));
    }
    if rel.is_absolute() {
        return Err(RetrievalError::Validation(format!(
            "path must be relative to the corpus root: {}",
            relative
        )));
    }
    if rel.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(RetrievalError::Validation(format!(
            "path escapes the corpus root: {}",
            relative
        )));
    }

    let root = root.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            RetrievalError::Validation(format!("corpus root does not exist: {}", root.display()))
        }
        _ => RetrievalError::Io(e),
    })?;

    let resolved = root.join(rel).canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            RetrievalError::NotFound(format!("no document at {}", relative))
        }
        _ => RetrievalError::Io(e),
    })?;

    // Symlinks inside the corpus may still point outside it.
    if !resolved.starts_with(&root) {
        return Err(RetrievalError::Validation(format!(
            "path escapes the corpus root: {}",
            relative
        )));
    }

    Ok(resolved)
}

/// CLI entry point for `vulnkb get`.
pub fn run_get(config: &Config, path: &str, json: bool) -> anyhow::Result<()> {
    let doc = match read_document(config, path) {
        Ok(doc) => doc,
        Err(err) => report_and_exit(&err, json),
    };

    if json {
        println!("{}", serde_json::to_string(&doc)?);
    } else {
        print!("{}", doc.content);
        if !doc.content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
