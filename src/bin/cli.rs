// src/bin/cli.rs
use clap::Parser;
use ruledoc_scrape::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run(cli::Cli::parse())
}
