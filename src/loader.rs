//! Corpus Loader.
//!
//! Walks the corpus root for files matching the configured globs and turns
//! each one into a [`CorpusFile`]: relative path, title, optional crawl
//! metadata, and raw body text. A single unreadable file is warned about and
//! skipped; it never aborts the batch.
//!
//! Crawled documents carry two optional labeled metadata lines:
//!
//! ```text
//! **Source URL:** https://swcregistry.io/docs/SWC-107
//! **Crawled on:** 2024-05-01 13:45:00
//! ```
//!
//! The first match for each label wins and scanning stops once both are
//! found. Files whose name starts with `_` are crawler bookkeeping (e.g.
//! `_website_info.json`) and are never treated as documents.

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::models::CorpusFile;

const SOURCE_URL_LABEL: &str = "**Source URL:**";
const CRAWLED_ON_LABEL: &str = "**Crawled on:**";

/// Corpus files matching the configured globs, as (absolute, relative) pairs
/// in deterministic path order. Does not read file contents.
pub fn matching_paths(config: &Config) -> Result<Vec<(PathBuf, String)>> {
    let root = &config.corpus.root;
    if !root.exists() {
        bail!("corpus root does not exist: {}", root.display());
    }

    let include_set = build_globset(&config.corpus.include_globs)?;
    let exclude_set = build_globset(&config.corpus.exclude_globs)?;

    let mut paths = Vec::new();
    let walker = WalkDir::new(root).follow_links(config.corpus.follow_symlinks);
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                eprintln!("warning: skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if file_name.starts_with('_') {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }

        paths.push((path.to_path_buf(), rel_str));
    }

    paths.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(paths)
}

/// Read and normalize every matching corpus file.
pub fn scan_corpus(config: &Config) -> Result<Vec<CorpusFile>> {
    let mut files = Vec::new();
    for (abs, rel) in matching_paths(config)? {
        match read_corpus_file(&abs, &rel) {
            Ok(file) => files.push(file),
            Err(e) => eprintln!("warning: skipping {}: {}", rel, e),
        }
    }
    Ok(files)
}

fn read_corpus_file(path: &Path, relative_path: &str) -> Result<CorpusFile> {
    let body = std::fs::read_to_string(path)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| relative_path.to_string());

    let title = extract_title(&body);
    let (source_url, crawled_raw) = extract_source_and_crawled(&body);
    let crawled_at = crawled_raw.as_deref().and_then(parse_crawled_at);

    Ok(CorpusFile {
        path: relative_path.to_string(),
        file_name,
        title,
        source_url,
        crawled_at,
        body,
    })
}

/// First non-empty line, with any leading `#` run and following whitespace
/// removed.
pub fn extract_title(text: &str) -> String {
    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return trimmed.trim_start_matches('#').trim_start().to_string();
        }
    }
    String::new()
}

/// Scan for the two labeled metadata lines. First match for each wins;
/// scanning stops once both are present.
pub fn extract_source_and_crawled(text: &str) -> (Option<String>, Option<String>) {
    let mut source = None;
    let mut crawled = None;
    for line in text.lines() {
        if source.is_none() {
            if let Some(rest) = line.strip_prefix(SOURCE_URL_LABEL) {
                source = Some(rest.trim().to_string());
            }
        }
        if crawled.is_none() {
            if let Some(rest) = line.strip_prefix(CRAWLED_ON_LABEL) {
                crawled = Some(rest.trim().to_string());
            }
        }
        if source.is_some() && crawled.is_some() {
            break;
        }
    }
    (source, crawled)
}

/// Normalize a crawl date to a UTC instant.
///
/// `/` separators become `-`; a bare `YYYY-MM-DD` gets midnight appended;
/// `YYYY-MM-DD HH:MM:SS` is taken as-is. Anything else falls back to RFC3339
/// then RFC2822, and `None` on failure; a malformed date never fails the
/// document.
pub fn parse_crawled_at(raw: &str) -> Option<DateTime<Utc>> {
    let cleaned = raw.trim().replace('/', "-");

    if let Ok(date) = NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(&cleaned) {
        return Some(dt.with_timezone(&Utc));
    }
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
