//! Ripple-Crawl main entry point
//!
//! This is the command-line interface for the Ripple-Crawl crawler.

use clap::Parser;
use ripple_crawl::config::{load_config_with_hash, validate, Config, FetcherKind};
use ripple_crawl::crawler::{crawl_with_config, default_seed_from_fixture};
use ripple_crawl::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ripple-Crawl: a concurrent, depth-bounded web crawler
///
/// Starting from a seed, Ripple-Crawl fetches every page reachable within
/// the depth limit exactly once and prints each page as it is found.
#[derive(Parser, Debug)]
#[command(name = "ripple-crawl")]
#[command(version)]
#[command(about = "A concurrent, depth-bounded web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Address to start crawling from (overrides the config file)
    #[arg(long)]
    seed: Option<String>,

    /// Maximum crawl depth, the seed counting as the first level
    #[arg(long)]
    depth: Option<u32>,

    /// Serve pages from a TOML fixture instead of the network
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);

    if let Err(e) = default_seed_from_fixture(&mut config) {
        tracing::error!("Failed to load fixture: {}", e);
        return Err(e.into());
    }

    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(&config, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_crawl=info,warn"),
            1 => EnvFilter::new("ripple_crawl=debug,info"),
            2 => EnvFilter::new("ripple_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line flags win over the config file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(seed) = &cli.seed {
        config.crawler.seed = seed.clone();
    }

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }

    if let Some(fixture) = &cli.fixture {
        config.fetcher.kind = FetcherKind::Static;
        config.fetcher.fixture_path = Some(fixture.clone());
    }
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Ripple-Crawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.crawler.seed);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Channel capacity: {}", config.crawler.channel_capacity);

    println!("\nFetcher:");
    match config.fetcher.kind {
        FetcherKind::Http => {
            println!("  Kind: http");
            println!("  Timeout: {}s", config.fetcher.timeout_secs);
            println!("  HTTPS only: {}", config.fetcher.https_only);
            println!("  User agent: {}", config.user_agent.header_value());
        }
        FetcherKind::Static => {
            println!("  Kind: static");
            if let Some(path) = &config.fetcher.fixture_path {
                println!("  Fixture: {}", path.display());
            }
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let report = crawl_with_config(config, |outcome| {
        if !quiet {
            println!("{}", outcome);
        }
    })
    .await
    .map_err(|e| {
        tracing::error!("Crawl failed: {}", e);
        e
    })?;

    if !quiet {
        print_statistics(&report.statistics());
    }

    Ok(())
}
