//! Campaign CLI: document ingestion and agent tooling for influencer campaigns.
//!
//! Reads brand files from URLs into a single text blob, stores campaign
//! briefs, and serves the agent HTTP shell.

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
