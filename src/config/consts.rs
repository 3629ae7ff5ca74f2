// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://realm.github.io/SwiftLint/";
pub const DIRECTORY_PATH: &str = "rule-directory.html";
pub const USER_AGENT: &str = concat!("ruledoc_scrape/", env!("CARGO_PKG_VERSION"));
pub const FETCH_TIMEOUT_SECS: u64 = 30;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const RULES_FILE: &str = "rules.json";
pub const DEBUG_LOG_FILE: &str = "debug.log";

// Crawl
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite

// Site template
pub const DIRECTORY_SECTION: &str = "section.section";
pub const RULE_CONTENT: &str = "div.section-content";
pub const EXAMPLES_OFFSET: usize = 4; // h1, p, ul, one intro node
