//! Shared record of claimed addresses
//!
//! Every crawl task holds an `Arc<VisitedSet>`. The only mutation is
//! [`VisitedSet::claim`], which tests and inserts under a single lock so two
//! tasks can never both believe they were first to an address.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Monotonic set of addresses already claimed for crawling
#[derive(Debug, Default)]
pub struct VisitedSet {
    claimed: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims an address
    ///
    /// # Returns
    ///
    /// * `true` - The address was not present and is now marked
    /// * `false` - The address was already claimed; the set is unchanged
    pub fn claim(&self, address: &str) -> bool {
        let mut claimed = self.lock();
        if claimed.contains(address) {
            return false;
        }
        claimed.insert(address.to_string())
    }

    /// Returns true if the address has been claimed
    pub fn contains(&self, address: &str) -> bool {
        self.lock().contains(address)
    }

    /// Number of claimed addresses
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Entries are only ever added, so a panic elsewhere cannot leave the set
    // half-updated; recover the guard instead of failing the claim.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.claimed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
