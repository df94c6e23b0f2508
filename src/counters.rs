//! Global cost counters, only increased with the `counters` feature enabled

use std::sync::atomic::{AtomicU64, Ordering};

/// A process wide counter
#[derive(Debug)]
pub struct GlobalCounter(AtomicU64);

impl GlobalCounter {
    /// Create a new counter starting at zero
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Add `amount` to the counter
    pub fn increase(&self, amount: u64) {
        self.0.fetch_add(amount, Ordering::Relaxed);
    }

    /// Read the current value
    pub fn read(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Read the current value and reset the counter to zero
    pub fn take(&self) -> u64 {
        self.0.swap(0, Ordering::Relaxed)
    }
}

impl Default for GlobalCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of calls to the comparison predicate
pub static COMPARISON_COUNTER: GlobalCounter = GlobalCounter::new();
/// Total length of all merged regions
pub static MERGE_SLICE_COUNTER: GlobalCounter = GlobalCounter::new();
/// Total number of elements parked in scratch space while merging
pub static MERGE_SCRATCH_COUNTER: GlobalCounter = GlobalCounter::new();
