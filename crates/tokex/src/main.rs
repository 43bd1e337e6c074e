//! tokex - exchange credentials for an OAuth 2.0 access token
//!
//! Main entry point for the tokex CLI.

use anyhow::Result;
use clap::Parser;

mod commands;

use commands::exchange;

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// tokex - exchange credentials for an OAuth 2.0 access token
///
/// Inputs are taken from flags first, then from the profile, and anything
/// still missing is prompted for.
#[derive(Parser)]
#[command(name = "tokex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the whole token response as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub exchange: exchange::ExchangeArgs,
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries prompts and the token
    let filter = if cli.verbose {
        "tokex=debug,tokex_oauth=debug,info"
    } else {
        "tokex=info,tokex_oauth=info,warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();

    let ctx = commands::Context {
        json_output: cli.json,
        verbose: cli.verbose,
    };

    exchange::run(cli.exchange, &ctx).await
}
