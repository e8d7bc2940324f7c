//! Crawler coordinator - termination detection for the task tree
//!
//! The coordinator owns the outstanding count. It starts at one for the
//! root task, grows by every branch count a task reports, and shrinks by one
//! for every terminal outcome. Because a task always reports its branch count
//! before spawning children and before its own outcome, and all tasks share
//! one ordered channel, the count reaches zero exactly when the last task
//! has reported.

use crate::crawler::event::{CrawlEvent, CrawlOutcome};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::task::{CrawlContext, CrawlTask};
use crate::crawler::visited::VisitedSet;
use crate::output::CrawlReport;
use crate::RippleError;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Drives a crawl from a seed until every spawned task has reported
#[derive(Clone)]
pub struct Coordinator {
    fetcher: Arc<dyn Fetcher>,
    channel_capacity: usize,
}

impl Coordinator {
    /// Creates a coordinator over the given fetch capability
    ///
    /// The event channel defaults to a capacity of one, so each task waits
    /// for the coordinator to take its previous signal before sending the
    /// next.
    pub fn new<F: Fetcher>(fetcher: F) -> Self {
        Self::from_shared(Arc::new(fetcher))
    }

    /// Creates a coordinator over an already shared fetcher
    pub fn from_shared(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            channel_capacity: 1,
        }
    }

    /// Sets the event channel capacity (at least one)
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    /// Crawls from `seed` up to `max_depth` levels and collects every outcome
    pub async fn run(&self, seed: &str, max_depth: u32) -> Result<CrawlReport, RippleError> {
        self.run_with(seed, max_depth, |_| {}).await
    }

    /// Crawls like [`Coordinator::run`], handing each outcome to `observer`
    /// as it arrives
    ///
    /// Fetch failures are reported as outcomes and never abort the crawl.
    /// The only error is a task exiting without reporting, which leaves the
    /// channel closed while signals are still outstanding.
    pub async fn run_with<O>(
        &self,
        seed: &str,
        max_depth: u32,
        mut observer: O,
    ) -> Result<CrawlReport, RippleError>
    where
        O: FnMut(&CrawlOutcome),
    {
        let mut report = CrawlReport::start(seed, max_depth);

        // A root with no depth would stay silent; there is nothing to wait on.
        if max_depth == 0 {
            tracing::info!("Max depth is 0, nothing to crawl from {}", seed);
            report.finish(0);
            return Ok(report);
        }

        tracing::info!("Starting crawl of {} to depth {}", seed, max_depth);

        let visited = Arc::new(VisitedSet::new());
        let (events_tx, mut events_rx) = mpsc::channel(self.channel_capacity);
        let context = CrawlContext::new(Arc::clone(&visited), Arc::clone(&self.fetcher), events_tx);

        // The coordinator keeps no sender, so the channel closes once every
        // task has exited.
        CrawlTask::root(seed, max_depth).spawn(context);

        let mut outstanding: usize = 1;
        report.note_outstanding(outstanding);

        while outstanding > 0 {
            let Some(event) = events_rx.recv().await else {
                tracing::error!(
                    "All crawl tasks exited with {} signal(s) outstanding",
                    outstanding
                );
                return Err(RippleError::EventStreamClosed { outstanding });
            };

            match event {
                CrawlEvent::Branches(count) => {
                    outstanding += count;
                    report.note_outstanding(outstanding);
                }
                CrawlEvent::Outcome(outcome) => {
                    outstanding -= 1;
                    tracing::debug!("{} ({} outstanding)", outcome, outstanding);
                    observer(&outcome);
                    report.record(outcome);
                }
            }
        }

        report.finish(visited.len());

        let stats = report.statistics();
        tracing::info!(
            "Crawl completed: {} found, {} cached, {} errors in {}ms",
            stats.found,
            stats.cached,
            stats.errors,
            stats.duration_ms.unwrap_or_default()
        );

        Ok(report)
    }
}

/// Crawls from `seed` up to `max_depth` levels with a one-off coordinator
///
/// # Example
///
/// ```
/// use ripple_crawl::crawler::{crawl, StaticFetcher};
///
/// # async fn example() -> ripple_crawl::Result<()> {
/// let fetcher = StaticFetcher::new()
///     .with_page("root", "Root", ["a"])
///     .with_page("a", "A", ["root"]);
///
/// let report = crawl("root", 4, fetcher).await?;
/// assert_eq!(report.found().count(), 2);
/// # Ok(())
/// # }
/// ```
pub async fn crawl<F: Fetcher>(
    seed: &str,
    max_depth: u32,
    fetcher: F,
) -> Result<CrawlReport, RippleError> {
    Coordinator::new(fetcher).run(seed, max_depth).await
}
