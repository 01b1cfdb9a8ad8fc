//! Entry point for switchyard, a provider registry and model resolver.
//!
//! This binary loads environment variables, installs logging, parses CLI
//! arguments via [`cli`], and dispatches to the appropriate subcommand
//! handler.

mod cli;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Runs the switchyard CLI.
///
/// Loads `.env` files (silently ignored if absent), sets up a stderr
/// `tracing` subscriber filtered by `RUST_LOG`, parses command-line
/// arguments into a [`cli::Cli`] struct, and dispatches the chosen
/// subcommand via [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::parse();
    cli::run(cli).await
}
