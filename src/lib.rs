//! Ripple-Crawl: a concurrent, depth-bounded web crawler
//!
//! Starting from a seed address, this crate fans out one task per discovered
//! link until a depth limit is reached, visiting every address at most once
//! and waiting for every spawned task before returning.

pub mod config;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for Ripple-Crawl operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Every task exited but the coordinator was still waiting on signals.
    /// Only happens when a task panics before reporting.
    #[error("Event stream closed with {outstanding} signal(s) still outstanding")]
    EventStreamClosed { outstanding: usize },
}

/// A fetch capability could not retrieve an address
///
/// This is the only error a crawl task can produce. It is reported to the
/// coordinator once and never retried or propagated to other tasks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct FetchError {
    description: String,
}

impl FetchError {
    /// Creates a fetch error carrying the given description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// The address has no page behind it
    pub fn not_found(address: &str) -> Self {
        Self::new(format!("not found: {}", address))
    }

    /// Returns the failure description
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while loading a canned fetch graph
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse fixture TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Page listed twice in fixture: {0}")]
    DuplicatePage(String),
}

/// Result type alias for Ripple-Crawl operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    crawl, Coordinator, CrawlOutcome, FetchedPage, Fetcher, HttpFetcher, StaticFetcher, VisitedSet,
};
pub use output::{CrawlReport, CrawlStatistics};
