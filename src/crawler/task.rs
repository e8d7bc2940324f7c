//! The recursive unit of crawl work
//!
//! A task either stays silent (no depth left), reports `Cached` (address
//! already claimed), or fetches its address and reports a branch count
//! followed by `Found` or `Error`. Children are spawned as independent tokio
//! tasks; a parent never waits on them.

use crate::crawler::event::{CrawlEvent, CrawlOutcome};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::visited::VisitedSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Shared handles every crawl task carries
#[derive(Clone)]
pub struct CrawlContext {
    visited: Arc<VisitedSet>,
    fetcher: Arc<dyn Fetcher>,
    events: mpsc::Sender<CrawlEvent>,
}

impl CrawlContext {
    pub fn new(
        visited: Arc<VisitedSet>,
        fetcher: Arc<dyn Fetcher>,
        events: mpsc::Sender<CrawlEvent>,
    ) -> Self {
        Self {
            visited,
            fetcher,
            events,
        }
    }

    async fn send(&self, event: CrawlEvent) {
        // The coordinator only hangs up once nothing is outstanding.
        if self.events.send(event).await.is_err() {
            tracing::trace!("Coordinator gone, dropping crawl event");
        }
    }
}

/// One pending visit: an address and how many levels may still be crawled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    address: String,
    remaining_depth: u32,
    level: u32,
}

impl CrawlTask {
    /// The seed task of a crawl limited to `max_depth` levels
    pub fn root(address: impl Into<String>, max_depth: u32) -> Self {
        Self {
            address: address.into(),
            remaining_depth: max_depth,
            level: 0,
        }
    }

    fn child(&self, address: String) -> Self {
        Self {
            address,
            remaining_depth: self.remaining_depth.saturating_sub(1),
            level: self.level + 1,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn remaining_depth(&self) -> u32 {
        self.remaining_depth
    }

    /// Number of links followed from the seed to reach this task
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns true if the task will finish without reporting anything
    pub fn is_exhausted(&self) -> bool {
        self.remaining_depth == 0
    }

    /// Runs the task on the tokio runtime
    pub fn spawn(self, context: CrawlContext) -> JoinHandle<()> {
        tokio::spawn(self.run(context))
    }

    /// Claims, fetches, reports, and fans out
    ///
    /// Emits nothing when depth is exhausted, `Cached` when the address was
    /// already claimed, and otherwise a branch count followed by exactly one
    /// `Found` or `Error`. The branch count is the number of children that
    /// will themselves report, so it is zero on failure and when the children
    /// would have no depth left.
    pub async fn run(self, context: CrawlContext) {
        if self.is_exhausted() {
            tracing::trace!("Depth exhausted at {}", self.address);
            return;
        }

        if !context.visited.claim(&self.address) {
            tracing::trace!("Already claimed: {}", self.address);
            context
                .send(CrawlEvent::Outcome(CrawlOutcome::Cached {
                    address: self.address,
                }))
                .await;
            return;
        }

        tracing::debug!(
            "Fetching {} (level {}, {} remaining)",
            self.address,
            self.level,
            self.remaining_depth
        );

        let page = match context.fetcher.fetch(&self.address).await {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!("Fetch failed for {}: {}", self.address, error);
                context.send(CrawlEvent::Branches(0)).await;
                context
                    .send(CrawlEvent::Outcome(CrawlOutcome::Error {
                        address: self.address,
                        error,
                    }))
                    .await;
                return;
            }
        };

        let discovered = page.links.len();
        let reporting_children = if self.remaining_depth > 1 {
            discovered
        } else {
            0
        };

        // Children must be counted before any of them can report.
        context.send(CrawlEvent::Branches(reporting_children)).await;

        for link in page.links {
            self.child(link).spawn(context.clone());
        }

        context
            .send(CrawlEvent::Outcome(CrawlOutcome::Found {
                address: self.address,
                level: self.level,
                links: discovered,
            }))
            .await;
    }
}
