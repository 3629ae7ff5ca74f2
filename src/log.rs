// src/log.rs
// Debug log for frontends. Library code only emits `tracing` events; whoever
// embeds the crate decides whether to call `init`.
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::uptime;

/// Overrides the level passed to [`init`], e.g. `RULEDOC_LOG=ruledoc_scrape=trace`.
pub const LOG_ENV: &str = "RULEDOC_LOG";

/// Install a global subscriber writing `[elapsed] LEVEL target: msg` lines to
/// `log_file` (appending). Falls back to stderr if the file cannot be opened.
/// A second call is a no-op.
pub fn init(level: &str, log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(uptime())
        .with_ansi(false);

    let result = match log_file.and_then(open_log) {
        Some(file) => builder.with_writer(Mutex::new(file)).try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    // Already installed (tests, embedding apps)
    let _ = result;
}

fn open_log(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).ok()?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
