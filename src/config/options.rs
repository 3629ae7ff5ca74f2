// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// Where and how politely to crawl.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Documentation host; every relative URL resolves against this.
    pub base_url: String,
    /// Directory page, relative to `base_url`.
    pub directory_path: String,
    /// Per-fetch timeout. A page that times out is skipped, not retried.
    pub timeout: Duration,
    /// Sleep between consecutive page fetches.
    pub request_pause: Duration,
    pub user_agent: String,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            directory_path: s!(DIRECTORY_PATH),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            request_pause: Duration::from_millis(REQUEST_PAUSE_MS),
            user_agent: s!(USER_AGENT),
        }
    }
}

impl CrawlOptions {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_directory_path(mut self, path: impl Into<String>) -> Self {
        self.directory_path = path.into();
        self
    }

    pub fn with_request_pause(mut self, pause: Duration) -> Self {
        self.request_pause = pause;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    dir: PathBuf,
    file_name: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(STORE_DIR),
            file_name: s!(RULES_FILE),
        }
    }
}

impl StoreOptions {
    /// Full path of the rules cache.
    pub fn cache_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(DEBUG_LOG_FILE)
    }

    /// Accepts either a directory (keeps the default file name) or a file path.
    pub fn set_path(&mut self, text: &str) {
        let text = text.trim();
        let p = PathBuf::from(text);
        let looks_like_dir = text.ends_with('/') || text.ends_with('\\') || p.is_dir();

        if looks_like_dir {
            self.dir = p;
            return;
        }
        if let Some(parent) = p.parent() {
            self.dir = parent.to_path_buf();
        }
        if let Some(name) = p.file_name() {
            self.file_name = name.to_string_lossy().into_owned();
        }
    }
}
