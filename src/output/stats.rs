//! Statistics derived from a crawl report
//!
//! This module summarizes a [`CrawlReport`] into counts and prints them.

use crate::crawler::CrawlOutcome;
use crate::output::report::CrawlReport;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages fetched successfully
    pub found: u64,

    /// Repeat visits absorbed by the visited set
    pub cached: u64,

    /// Failed fetches
    pub errors: u64,

    /// Total links discovered across all found pages
    pub links_discovered: u64,

    /// Deepest level a page was found at (seed is level 0)
    pub deepest_level: Option<u32>,

    /// Largest number of signals outstanding at once
    pub peak_outstanding: usize,

    /// Wall-clock duration in milliseconds, once finished
    pub duration_ms: Option<i64>,
}

impl CrawlStatistics {
    /// Tallies every outcome in the report
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut stats = Self {
            peak_outstanding: report.peak_outstanding,
            duration_ms: report.duration().map(|d| d.num_milliseconds()),
            ..Self::default()
        };

        for outcome in &report.outcomes {
            match outcome {
                CrawlOutcome::Found { level, links, .. } => {
                    stats.found += 1;
                    stats.links_discovered += *links as u64;
                    stats.deepest_level = stats.deepest_level.max(Some(*level));
                }
                CrawlOutcome::Cached { .. } => stats.cached += 1,
                CrawlOutcome::Error { .. } => stats.errors += 1,
            }
        }

        stats
    }

    /// Fetches attempted: every found page and every failure
    pub fn fetches(&self) -> u64 {
        self.found + self.errors
    }

    /// Terminal signals received by the coordinator
    pub fn signals(&self) -> u64 {
        self.found + self.cached + self.errors
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!();
    print!("{}", format_statistics(stats));
}

/// Renders the statistics summary printed after a crawl
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::from("=== Crawl Statistics ===\n\n");

    out.push_str("Overview:\n");
    out.push_str(&format!("  Pages found: {}\n", stats.found));
    out.push_str(&format!("  Already cached: {}\n", stats.cached));
    out.push_str(&format!("  Fetch errors: {}\n", stats.errors));
    out.push_str(&format!("  Links discovered: {}\n", stats.links_discovered));
    if let Some(level) = stats.deepest_level {
        out.push_str(&format!("  Deepest level reached: {}\n", level));
    }
    out.push_str(&format!("  Signals received: {}\n", stats.signals()));
    out.push_str(&format!(
        "  Peak outstanding signals: {}\n",
        stats.peak_outstanding
    ));
    if let Some(ms) = stats.duration_ms {
        out.push_str(&format!("  Duration: {}ms\n", ms));
    }
    out.push('\n');

    let fetches = stats.fetches();
    let success_rate = if fetches > 0 {
        (stats.found as f64 / fetches as f64) * 100.0
    } else {
        0.0
    };

    out.push_str(&format!(
        "Success Rate: {:.1}% ({} / {} fetches succeeded)\n",
        success_rate, stats.found, fetches
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchError;

    #[test]
    fn test_statistics_from_report() {
        let mut report = CrawlReport::start("root", 4);
        report.note_outstanding(3);
        report.record(CrawlOutcome::Found {
            address: "root".to_string(),
            level: 0,
            links: 2,
        });
        report.record(CrawlOutcome::Found {
            address: "a".to_string(),
            level: 1,
            links: 1,
        });
        report.record(CrawlOutcome::Cached {
            address: "root".to_string(),
        });
        report.record(CrawlOutcome::Error {
            address: "b".to_string(),
            error: FetchError::not_found("b"),
        });

        let stats = report.statistics();

        assert_eq!(stats.found, 2);
        assert_eq!(stats.cached, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.links_discovered, 3);
        assert_eq!(stats.deepest_level, Some(1));
        assert_eq!(stats.peak_outstanding, 3);
        assert_eq!(stats.fetches(), 3);
        assert_eq!(stats.signals(), 4);
        assert_eq!(stats.duration_ms, None);
    }

    #[test]
    fn test_format_statistics() {
        let stats = CrawlStatistics {
            found: 4,
            cached: 6,
            errors: 1,
            links_discovered: 10,
            deepest_level: Some(2),
            peak_outstanding: 3,
            duration_ms: Some(12),
        };

        let text = format_statistics(&stats);
        assert!(text.contains("  Pages found: 4\n"));
        assert!(text.contains("  Signals received: 11\n"));
        assert!(text.contains("  Deepest level reached: 2\n"));
        assert!(text.contains("  Duration: 12ms\n"));
        assert!(text.contains("Success Rate: 80.0% (4 / 5 fetches succeeded)"));
    }

    #[test]
    fn test_format_statistics_without_fetches() {
        let text = format_statistics(&CrawlStatistics::default());
        assert!(text.contains("  Signals received: 0\n"));
        assert!(!text.contains("Deepest level"));
        assert!(text.contains("Success Rate: 0.0% (0 / 0 fetches succeeded)"));
    }

    #[test]
    fn test_empty_report_statistics() {
        let stats = CrawlReport::start("root", 1).statistics();
        assert_eq!(stats, CrawlStatistics::default());
    }
}
