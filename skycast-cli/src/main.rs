//! Binary crate for the `skycast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive settings
//! - Human-friendly output formatting

use clap::Parser;
use skycast_core::ApiConfig;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();

    // Checked before anything runs; offline lookups don't need a key.
    let config = if cmd.command.requires_api_key() {
        Some(ApiConfig::from_env()?)
    } else {
        None
    };

    cmd.run(config).await
}
