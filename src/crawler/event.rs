//! Events flowing from crawl tasks to the coordinator
//!
//! Tasks report on a single ordered channel. Terminal outcomes resolve one
//! outstanding signal each; branch counts grow the number the coordinator
//! still expects.

use crate::FetchError;
use std::fmt;

/// Terminal result of one crawl task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The address was fetched and its links were handed to child tasks
    Found {
        /// The fetched address
        address: String,

        /// Number of links followed from the seed to reach this address
        level: u32,

        /// Number of links discovered on the page
        links: usize,
    },

    /// Another task had already claimed the address
    Cached {
        /// The repeated address
        address: String,
    },

    /// The fetcher could not retrieve the address
    Error {
        /// The address that failed
        address: String,

        /// Why the fetch failed
        error: FetchError,
    },
}

impl CrawlOutcome {
    /// The address this outcome is about
    pub fn address(&self) -> &str {
        match self {
            Self::Found { address, .. } | Self::Cached { address } | Self::Error { address, .. } => {
                address
            }
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { address, .. } => write!(f, "found: {}", address),
            Self::Cached { address } => write!(f, "url: {} already cached", address),
            Self::Error { error, .. } => write!(f, "{}", error),
        }
    }
}

/// A signal sent by a crawl task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// The task finished; resolves one outstanding signal
    Outcome(CrawlOutcome),

    /// The task fetched its page and will spawn this many children
    Branches(usize),
}
