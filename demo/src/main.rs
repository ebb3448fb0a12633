//! Placeholder API demo binary.
//!
//! Runs the users, todos and create-post examples against the placeholder
//! API (or the local mock server) and renders each request's state.

mod app;
mod cli;
mod render;

use fetch_core::{FetchConfig, Fetcher, PlaceholderApi};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.apply(FetchConfig::from_env()?);
    tracing::info!(base_url = %config.base_url, policy = ?config.status_policy, "Starting fetch demo");
    let api = PlaceholderApi::from_config(&config);

    let mut stdout = std::io::stdout().lock();
    let mut failed = 0;
    for example in cli.examples() {
        let fetcher = Fetcher::from_config(&config)?;
        let state = app::run_example(example, &api, fetcher, &mut stdout).await?;
        if state.error().is_some() {
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} example(s) ended in an error state");
    }
    Ok(())
}
