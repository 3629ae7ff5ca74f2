// src/cli.rs
//! `ruledoc` command line: fetch, cache, list, and show rules.

use std::io::Write;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use owo_colors::{OwoColorize, Style};

use crate::{
    config::options::{CrawlOptions, StoreOptions},
    core::net::HttpFetcher,
    data::{self, AttributeField, RuleRecord},
    highlight,
    progress::CrawlEvent,
    scrape, store,
};

#[derive(Parser)]
#[command(
    name = "ruledoc",
    version,
    about = "Scrape and browse SwiftLint rule documentation",
    after_help = "Examples:\n  ruledoc fetch\n  ruledoc fetch --refresh --pause-ms 250\n  ruledoc list --disabled\n  ruledoc show force_cast",
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(long, global = true, help = "Cache file or directory (default: .store/rules.json)")]
    pub cache: Option<String>,
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue, help = "Debug-level logging")]
    pub verbose: bool,
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue, help = "Errors only")]
    pub quiet: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load rules from cache, or crawl the site and cache them
    Fetch {
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Ignore the cache and crawl again")]
        refresh: bool,
        #[arg(long, help = "Documentation host (default: SwiftLint docs)")]
        base_url: Option<String>,
        #[arg(long, help = "Directory page, relative to the base URL")]
        directory: Option<String>,
        #[arg(long, help = "Pause between page requests in milliseconds")]
        pause_ms: Option<u64>,
        #[arg(long, help = "Per-request timeout in seconds")]
        timeout_secs: Option<u64>,
    },
    /// List cached rules, enabled first
    List {
        #[arg(long, action = clap::ArgAction::SetTrue, conflicts_with = "disabled")]
        enabled: bool,
        #[arg(long, action = clap::ArgAction::SetTrue)]
        disabled: bool,
    },
    /// Show one rule by identifier or name
    Show {
        query: String,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "No colors")]
        plain: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let mut store_opts = StoreOptions::default();
    if let Some(p) = &cli.cache {
        store_opts.set_path(p);
    }

    let level = if cli.quiet { "error" } else if cli.verbose { "debug" } else { "info" };
    crate::log::init(level, Some(&store_opts.log_path()));

    match cli.cmd {
        Commands::Fetch { refresh, base_url, directory, pause_ms, timeout_secs } => {
            let mut crawl = CrawlOptions::default();
            if let Some(u) = base_url { crawl = crawl.with_base_url(u); }
            if let Some(d) = directory { crawl = crawl.with_directory_path(d); }
            if let Some(ms) = pause_ms { crawl = crawl.with_request_pause(Duration::from_millis(ms)); }
            if let Some(s) = timeout_secs { crawl = crawl.with_timeout(Duration::from_secs(s)); }
            fetch(&store_opts, crawl, refresh, cli.quiet)
        }
        Commands::List { enabled, disabled } => list(&store_opts, enabled, disabled),
        Commands::Show { query, plain } => show(&store_opts, &query, plain),
    }
}

fn fetch(store_opts: &StoreOptions, crawl: CrawlOptions, refresh: bool, quiet: bool) -> Result<()> {
    let path = store_opts.cache_path();
    if !refresh {
        if let Some(rules) = store::load_rules(&path)? {
            println!("{} rules cached at {}", rules.len(), path.display());
            return Ok(());
        }
    }

    let fetcher = HttpFetcher::from_options(&crawl)?;
    let handle = scrape::spawn(crawl, fetcher);

    for ev in handle.events.iter() {
        if quiet { continue; }
        match ev {
            CrawlEvent::DirectoryLoading => eprintln!("Loading rule directory…"),
            CrawlEvent::PagesProgress { completed, total } => {
                eprint!("\rFetched {completed}/{total}");
                let _ = std::io::stderr().flush();
                if completed == total { eprintln!(); }
            }
            CrawlEvent::PageFailed { url, error } => eprintln!("\n{} {url}: {error}", "skip".yellow().bold()),
            CrawlEvent::Finished { .. } | CrawlEvent::Failed { .. } => {}
        }
    }
    let report = handle.join().wrap_err("crawl failed")?;

    if report.records.is_empty() {
        return Err(eyre!("no rules scraped ({} directory entries)", report.total));
    }
    store::save_rules(&path, &report.records)?;
    println!(
        "{} {} rules → {} ({} skipped)",
        "saved".green().bold(),
        report.records.len(),
        path.display(),
        report.skipped()
    );
    Ok(())
}

fn load_cached(store_opts: &StoreOptions) -> Result<Vec<RuleRecord>> {
    let path = store_opts.cache_path();
    store::load_rules(&path)?
        .ok_or_else(|| eyre!("no cache at {}; run `ruledoc fetch` first", path.display()))
}

fn list(store_opts: &StoreOptions, only_enabled: bool, only_disabled: bool) -> Result<()> {
    let rules = load_cached(store_opts)?;
    let (on, off) = data::partition_by_enabled(&rules);

    if !only_disabled { print_group("Enabled Rules", &on); }
    if !only_enabled { print_group("Disabled Rules", &off); }
    Ok(())
}

fn print_group(title: &str, group: &[&RuleRecord]) {
    println!("{} ({})", title.bold(), group.len());
    for r in group {
        println!("  {:<40} {}", r.attributes.identifier, r.name);
    }
}

fn show(store_opts: &StoreOptions, query: &str, plain: bool) -> Result<()> {
    let rules = load_cached(store_opts)?;
    let rule = data::find_rule(&rules, query).ok_or_else(|| eyre!("no rule matches `{query}`"))?;

    println!("{}\n", rule.name.bold());
    println!("{}\n", rule.info);
    for field in AttributeField::ALL {
        println!("  {:<32} {}", field.label(), rule.attributes.display_value(field));
    }

    for (title, examples) in [
        ("Non Triggering Examples", &rule.non_triggering_examples),
        ("Triggering Examples", &rule.triggering_examples),
    ] {
        if examples.is_empty() { continue; }
        println!("\n{}", title.bold());
        for ex in examples {
            println!("\n{}", render_example(ex, plain));
        }
    }
    Ok(())
}

fn render_example(snippet: &str, plain: bool) -> String {
    if plain {
        return highlight::plain_text(snippet);
    }
    let mut out = s!();
    for tok in highlight::render(snippet) {
        if tok.style.is_plain() {
            out.push_str(&tok.text);
            continue;
        }
        let (r, g, b) = tok.style.rgb();
        let mut style = Style::new().truecolor(r, g, b);
        if tok.style.bold { style = style.bold(); }
        if tok.style.italic { style = style.italic(); }
        out.push_str(&tok.text.style(style).to_string());
    }
    out
}
