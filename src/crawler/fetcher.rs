//! Fetch capability and its HTTP implementation
//!
//! The crawl core only depends on the [`Fetcher`] trait: given an address,
//! return the page body and the addresses it links to, or fail. The
//! [`HttpFetcher`] here issues a GET, rejects non-2xx statuses, and extracts
//! links from the returned HTML.

use crate::config::{Config, FetcherConfig, UserAgentConfig};
use crate::crawler::parser::parse_html;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::sync::Arc;
use std::time::Duration;

/// Maximum redirects followed for one fetch
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// Page body content
    pub body: String,

    /// Addresses the page links to, in discovery order
    pub links: Vec<String>,
}

/// Retrieves a page and the addresses it links to
///
/// Implementations place no constraints on latency or link order. The
/// crawler never fetches the same address twice within one run.
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    async fn fetch(&self, address: &str) -> Result<FetchedPage, FetchError>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, address: &str) -> Result<FetchedPage, FetchError> {
        (**self).fetch(address).await
    }
}

/// Builds an HTTP client from the user agent and fetcher settings
///
/// # Example
///
/// ```
/// use ripple_crawl::config::{FetcherConfig, UserAgentConfig};
/// use ripple_crawl::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetcher: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(fetcher.timeout_secs);

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .https_only(fetcher.https_only)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP and extracts links from their HTML
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the `[fetcher]` and `[user-agent]` sections
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent, &config.fetcher)?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, address: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(address)
            .send()
            .await
            .map_err(|e| classify_error(address, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(format!(
                "HTTP {} for {}",
                status.as_u16(),
                address
            )));
        }

        // Relative links resolve against where the redirects ended up.
        let final_url = response.url().clone();

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::new(format!("failed to read body of {}: {}", address, e)))?;

        let links = parse_html(&body, &final_url);
        tracing::trace!("{} links extracted from {}", links.len(), final_url);

        Ok(FetchedPage { body, links })
    }
}

fn classify_error(address: &str, error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::new(format!("request timeout: {}", address))
    } else if error.is_connect() {
        FetchError::new(format!("connection failed: {}", address))
    } else if error.is_builder() {
        FetchError::new(format!("invalid address {}: {}", address, error))
    } else {
        FetchError::new(format!("request to {} failed: {}", address, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user_agent() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&create_test_user_agent(), &FetcherConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_user_agent_format() {
        assert_eq!(
            create_test_user_agent().header_value(),
            "TestCrawler/1.0 (+https://example.com/about; admin@example.com)"
        );
    }

    #[tokio::test]
    async fn test_invalid_address_is_fetch_error() {
        let fetcher = HttpFetcher::from_config(&Config::default()).unwrap();
        let error = fetcher.fetch("not a url").await.unwrap_err();
        assert!(error.description().contains("not a url"));
    }

    #[tokio::test]
    async fn test_https_only_rejects_plain_http() {
        let mut config = Config::default();
        config.fetcher.https_only = true;
        let fetcher = HttpFetcher::from_config(&config).unwrap();

        let result = fetcher.fetch("http://127.0.0.1:9/").await;
        assert!(result.is_err());
    }

    // Status and link handling against a live server are covered with
    // wiremock in the integration tests.
}
