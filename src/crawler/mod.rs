//! Crawler module: the concurrent crawl engine and its fetch capabilities
//!
//! This module contains:
//! - The visited set that guarantees each address is fetched at most once
//! - Crawl tasks that claim, fetch, and fan out one task per link
//! - The coordinator that detects when every spawned task has reported
//! - HTTP and canned implementations of the fetch capability

mod coordinator;
mod event;
mod fetcher;
mod fixture;
mod parser;
mod task;
mod visited;

pub use coordinator::{crawl, Coordinator};
pub use event::{CrawlEvent, CrawlOutcome};
pub use fetcher::{build_http_client, FetchedPage, Fetcher, HttpFetcher};
pub use fixture::StaticFetcher;
pub use parser::parse_html;
pub use task::{CrawlContext, CrawlTask};
pub use visited::VisitedSet;

use crate::config::{Config, FetcherKind};
use crate::{ConfigError, CrawlReport, RippleError};
use std::sync::Arc;

/// Builds the fetch capability named by the `[fetcher]` section
///
/// # Returns
///
/// * `Ok(Arc<dyn Fetcher>)` - An HTTP or fixture-backed fetcher
/// * `Err(RippleError)` - The client could not be built or the fixture could not be loaded
pub fn fetcher_from_config(config: &Config) -> Result<Arc<dyn Fetcher>, RippleError> {
    let fetcher: Arc<dyn Fetcher> = match config.fetcher.kind {
        FetcherKind::Http => Arc::new(HttpFetcher::from_config(config)?),
        FetcherKind::Static => {
            let path = config.fetcher.fixture_path.as_deref().ok_or_else(|| {
                ConfigError::Validation(
                    "fixture_path is required when kind = \"static\"".to_string(),
                )
            })?;
            Arc::new(StaticFetcher::load(path)?)
        }
    };
    Ok(fetcher)
}

/// Fills in an empty seed from the first page of a static fixture
///
/// Lets `--fixture PATH` run on its own. A seed that is already set, or an
/// HTTP fetcher, leaves the configuration untouched.
pub fn default_seed_from_fixture(config: &mut Config) -> Result<(), RippleError> {
    if !config.crawler.seed.trim().is_empty() || config.fetcher.kind != FetcherKind::Static {
        return Ok(());
    }
    let Some(path) = config.fetcher.fixture_path.as_deref() else {
        return Ok(());
    };

    let fixture = StaticFetcher::load(path)?;
    if let Some(address) = fixture.first_address() {
        tracing::info!("No seed given, starting from first fixture page: {}", address);
        config.crawler.seed = address.to_string();
    }
    Ok(())
}

/// Runs the crawl described by a configuration
///
/// Builds the fetcher, then crawls from `crawler.seed` to `crawler.max-depth`
/// using the configured channel capacity.
pub async fn crawl_with_config<O>(config: &Config, observer: O) -> Result<CrawlReport, RippleError>
where
    O: FnMut(&CrawlOutcome),
{
    let fetcher = fetcher_from_config(config)?;
    Coordinator::from_shared(fetcher)
        .with_channel_capacity(config.crawler.channel_capacity)
        .run_with(&config.crawler.seed, config.crawler.max_depth, observer)
        .await
}
