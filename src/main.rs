// src/main.rs

//! bookscout CLI
//!
//! `serve` runs the scheduler and the JSON API; `refresh` runs a single
//! acquisition cycle and prints the summary; `validate` checks the
//! configuration file.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use bookscout::{
    cache::CatalogCache,
    error::Result,
    models::Config,
    pipeline::{RefreshScheduler, run_refresh},
    server::{self, AppState},
    services::{Fetch, HttpFetcher},
};

/// bookscout - Book catalog scraper and API server
#[derive(Parser, Debug)]
#[command(
    name = "bookscout",
    version,
    about = "Scrapes World of Books into an in-memory catalog served over JSON"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the refresh scheduler and the API server
    Serve {
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run a single refresh cycle and print the summary
    Refresh,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env_overrides();

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let config = Arc::new(config);
            let cache = Arc::new(CatalogCache::new());
            let fetcher: Arc<dyn Fetch> = Arc::new(HttpFetcher::new(&config.scraper)?);
            let scheduler = Arc::new(RefreshScheduler::new(
                Arc::clone(&config),
                fetcher,
                Arc::clone(&cache),
            ));

            tokio::spawn(Arc::clone(&scheduler).run());
            server::serve(AppState::new(config, cache, scheduler)).await?;
        }

        Command::Refresh => {
            config.validate()?;
            let fetcher = HttpFetcher::new(&config.scraper)?;
            let cache = CatalogCache::new();

            let outcome = run_refresh(&config, &fetcher, &cache).await;
            log::info!(
                "Refreshed {} categories: {} books ({} scraped / {} fallback)",
                config.categories.len(),
                outcome.total_books,
                outcome.scraped_categories,
                outcome.fallback_categories,
            );
        }

        Command::Validate => {
            let config = Config::load(&cli.config)?;
            config.validate()?;
            log::info!("Configuration OK: {} categories", config.categories.len());
        }
    }

    Ok(())
}
