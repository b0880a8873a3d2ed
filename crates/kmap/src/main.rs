//! Kmap CLI binary.

use anyhow::Result;
use kmap::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the kmap CLI.
fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=kmap=debug cargo run -- dot --key bayes
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kmap=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting kmap CLI");

    let cli = Cli::parse_args();
    cli.execute()?;

    tracing::debug!("Kmap CLI completed successfully");
    Ok(())
}
