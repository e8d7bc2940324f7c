//! Canned fetch capability backed by an in-memory page graph
//!
//! Pages come from code or from a TOML fixture:
//!
//! ```toml
//! [[page]]
//! url = "https://golang.org/"
//! body = "The Go Programming Language"
//! links = ["https://golang.org/pkg/", "https://golang.org/cmd/"]
//! ```
//!
//! Fetching an address with no page fails with `not found: <address>`.
//! Every call is counted, hits and misses alike.

use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::{FetchError, FixtureError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default, rename = "page")]
    pages: Vec<FixturePage>,
}

#[derive(Debug, Deserialize)]
struct FixturePage {
    url: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    links: Vec<String>,
}

/// Fetcher that serves pages from a fixed map
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, FetchedPage>,
    first_address: Option<String>,
    latency: Option<Duration>,
    calls: Mutex<HashMap<String, usize>>,
}

impl StaticFetcher {
    /// Creates a fetcher with no pages
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page, replacing any page already at `address`
    pub fn with_page<I, S>(mut self, address: &str, body: &str, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(address, body, links);
        self
    }

    /// Delays every fetch, so concurrent tasks genuinely overlap
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Adds a page, replacing any page already at `address`
    pub fn insert<I, S>(&mut self, address: &str, body: &str, links: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.first_address.is_none() {
            self.first_address = Some(address.to_string());
        }
        self.pages.insert(
            address.to_string(),
            FetchedPage {
                body: body.to_string(),
                links: links.into_iter().map(Into::into).collect(),
            },
        );
    }

    /// Parses a TOML fixture
    pub fn from_toml_str(content: &str) -> Result<Self, FixtureError> {
        let file: FixtureFile = toml::from_str(content)?;
        let mut fetcher = Self::new();

        for page in file.pages {
            if fetcher.pages.contains_key(&page.url) {
                return Err(FixtureError::DuplicatePage(page.url));
            }
            fetcher.insert(&page.url, &page.body, page.links);
        }

        Ok(fetcher)
    }

    /// Loads a TOML fixture from disk
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        let fetcher = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded {} fixture pages from {}",
            fetcher.page_count(),
            path.display()
        );
        Ok(fetcher)
    }

    /// Number of pages the fetcher can serve
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Address of the first page added, the natural seed for a fixture
    pub fn first_address(&self) -> Option<&str> {
        self.first_address.as_deref()
    }

    /// How many times `address` was fetched
    pub fn fetch_count(&self, address: &str) -> usize {
        self.calls().get(address).copied().unwrap_or(0)
    }

    /// Total number of fetch calls across all addresses
    pub fn total_fetches(&self) -> usize {
        self.calls().values().sum()
    }

    /// Every address fetched at least once, sorted
    pub fn fetched_addresses(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.calls().keys().cloned().collect();
        addresses.sort();
        addresses
    }

    fn calls(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, address: &str) -> Result<FetchedPage, FetchError> {
        *self.calls().entry(address.to_string()).or_insert(0) += 1;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.pages
            .get(address)
            .cloned()
            .ok_or_else(|| FetchError::not_found(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLANG: &str = include_str!("../../fixtures/golang.toml");

    #[tokio::test]
    async fn test_serves_known_page() {
        let fetcher = StaticFetcher::new().with_page("root", "Root", ["a", "b"]);

        let page = fetcher.fetch("root").await.unwrap();
        assert_eq!(page.body, "Root");
        assert_eq!(page.links, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let fetcher = StaticFetcher::new();

        let error = fetcher.fetch("x").await.unwrap_err();
        assert_eq!(error.to_string(), "not found: x");
    }

    #[tokio::test]
    async fn test_counts_hits_and_misses() {
        let fetcher = StaticFetcher::new().with_page("a", "", Vec::<String>::new());

        let _ = fetcher.fetch("a").await;
        let _ = fetcher.fetch("a").await;
        let _ = fetcher.fetch("missing").await;

        assert_eq!(fetcher.fetch_count("a"), 2);
        assert_eq!(fetcher.fetch_count("missing"), 1);
        assert_eq!(fetcher.fetch_count("never"), 0);
        assert_eq!(fetcher.total_fetches(), 3);
        assert_eq!(
            fetcher.fetched_addresses(),
            vec!["a".to_string(), "missing".to_string()]
        );
    }

    #[test]
    fn test_loads_golang_fixture() {
        let fetcher = StaticFetcher::from_toml_str(GOLANG).unwrap();
        assert_eq!(fetcher.page_count(), 4);
        assert_eq!(fetcher.first_address(), Some("https://golang.org/"));
    }

    #[test]
    fn test_first_address_survives_replacement() {
        let fetcher = StaticFetcher::new()
            .with_page("b", "", ["a"])
            .with_page("a", "", ["b"])
            .with_page("b", "again", Vec::<String>::new());
        assert_eq!(fetcher.first_address(), Some("b"));
        assert_eq!(StaticFetcher::new().first_address(), None);
    }

    #[test]
    fn test_fixture_page_defaults() {
        let fetcher = StaticFetcher::from_toml_str("[[page]]\nurl = \"lonely\"\n").unwrap();
        assert_eq!(fetcher.page_count(), 1);
    }

    #[test]
    fn test_duplicate_fixture_page_rejected() {
        let content = "[[page]]\nurl = \"a\"\n\n[[page]]\nurl = \"a\"\n";
        let result = StaticFetcher::from_toml_str(content);
        assert!(matches!(result, Err(FixtureError::DuplicatePage(url)) if url == "a"));
    }

    #[test]
    fn test_invalid_fixture_toml() {
        let result = StaticFetcher::from_toml_str("[[page]\nurl =");
        assert!(matches!(result, Err(FixtureError::Parse(_))));
    }
}
