//! `rosters` — collegiate volleyball roster scraper.
//!
//! Scrapes athletics-site roster pages into one normalized CSV per season.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
