//! Output module for crawl results
//!
//! This module handles:
//! - Collecting outcomes into a per-run report
//! - Deriving and printing crawl statistics

mod report;
pub mod stats;

pub use report::CrawlReport;
pub use stats::{format_statistics, print_statistics, CrawlStatistics};
