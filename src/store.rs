// src/store.rs
//! Local cache of scraped rules.
//!
//! Layout: one JSON array of `RuleRecord` (camelCase keys), written atomically
//! so a crashed run never leaves a half-written cache behind.

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::{
    config::options::{CrawlOptions, StoreOptions},
    core::net::Fetch,
    data::RuleRecord,
    error::StoreError,
    progress::Progress,
    scrape,
};

/// Read the cache. `Ok(None)` when there is no cache file yet.
pub fn load_rules(path: &Path) -> Result<Option<Vec<RuleRecord>>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
    };
    let rules = serde_json::from_str(&text)
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;
    Ok(Some(rules))
}

/// Write the whole rule list, replacing any previous cache in one step.
pub fn save_rules(path: &Path, rules: &[RuleRecord]) -> Result<(), StoreError> {
    let io_err = |source: std::io::Error| StoreError::Io { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    // Temp file in the same directory so the final rename stays on one filesystem
    let tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    {
        let mut out = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut out, rules)
            .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;
        out.flush().map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    info!("Cache: saved {} rules → {}", rules.len(), path.display());
    Ok(())
}

/// Cached rules if present, otherwise crawl and cache the result.
/// An empty crawl is returned but not written.
pub fn load_or_crawl<F: Fetch + ?Sized>(
    store: &StoreOptions,
    crawl: &CrawlOptions,
    fetcher: &F,
    progress: Option<&mut dyn Progress>,
) -> Result<Vec<RuleRecord>, StoreError> {
    let path = store.cache_path();
    match load_rules(&path) {
        Ok(Some(rules)) => {
            info!("Cache: loaded {} rules ← {}", rules.len(), path.display());
            return Ok(rules);
        }
        Ok(None) => {}
        // A corrupt cache is replaced by a fresh crawl
        Err(e) => warn!("Cache: ignoring unreadable cache: {e}"),
    }

    let report = scrape::crawl(crawl, fetcher, progress)?;
    if !report.records.is_empty() {
        save_rules(&path, &report.records)?;
    }
    Ok(report.records)
}
