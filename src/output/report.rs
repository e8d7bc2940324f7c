//! Collected result of one crawl run

use crate::crawler::CrawlOutcome;
use crate::output::stats::CrawlStatistics;
use crate::FetchError;
use chrono::{DateTime, Duration, Utc};

/// Every outcome of a crawl, in the order the coordinator received them
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Address the crawl started from
    pub seed: String,

    /// Depth limit the crawl ran with
    pub max_depth: u32,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Terminal outcomes in arrival order
    pub outcomes: Vec<CrawlOutcome>,

    /// Largest number of signals the coordinator waited on at once
    pub peak_outstanding: usize,

    /// Addresses claimed in the visited set when the crawl finished
    pub claimed: usize,
}

impl CrawlReport {
    /// Starts an empty report stamped with the current time
    pub fn start(seed: &str, max_depth: u32) -> Self {
        Self {
            seed: seed.to_string(),
            max_depth,
            started_at: Utc::now(),
            finished_at: None,
            outcomes: Vec::new(),
            peak_outstanding: 0,
            claimed: 0,
        }
    }

    pub fn record(&mut self, outcome: CrawlOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn note_outstanding(&mut self, outstanding: usize) {
        self.peak_outstanding = self.peak_outstanding.max(outstanding);
    }

    /// Stamps the finish time and the final visited-set size
    pub fn finish(&mut self, claimed: usize) {
        self.claimed = claimed;
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration, once finished
    pub fn duration(&self) -> Option<Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }

    /// Addresses that were fetched successfully
    pub fn found(&self) -> impl Iterator<Item = &str> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.is_found())
            .map(CrawlOutcome::address)
    }

    /// Repeat visits absorbed by the visited set
    pub fn cached(&self) -> impl Iterator<Item = &str> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.is_cached())
            .map(CrawlOutcome::address)
    }

    /// Failed fetches with their errors
    pub fn errors(&self) -> impl Iterator<Item = (&str, &FetchError)> + '_ {
        self.outcomes.iter().filter_map(|o| match o {
            CrawlOutcome::Error { address, error } => Some((address.as_str(), error)),
            _ => None,
        })
    }

    pub fn statistics(&self) -> CrawlStatistics {
        CrawlStatistics::from_report(self)
    }
}
