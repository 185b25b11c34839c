//! Atomic count/sum accumulators

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

/// A concurrent count/sum accumulator
///
/// Two instances exist per pipeline run: one recording what the producer
/// emitted, one recording what the aggregator drained. Both fields are
/// updated atomically, so recording is safe from any task. Snapshots taken
/// for verification are only meaningful once the recording side has
/// quiesced; the pipeline enforces this by waiting for the full channel
/// drain before reading.
#[derive(Debug, Default)]
pub struct Tally {
    count: AtomicI64,
    sum: AtomicI64,
}

impl Tally {
    /// Create a new empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one value: increments the count and adds the value to the sum
    pub fn record(&self, value: i64) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.sum.fetch_add(value, Ordering::SeqCst);
    }

    /// Take a point-in-time snapshot of the accumulators
    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            count: self.count.load(Ordering::SeqCst),
            sum: self.sum.load(Ordering::SeqCst),
        }
    }
}

/// A plain-value snapshot of a [`Tally`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallySnapshot {
    /// Number of values recorded
    pub count: i64,
    /// Sum of values recorded
    pub sum: i64,
}

impl TallySnapshot {
    /// Sum of the sequence 1..=count
    ///
    /// When the recorded values are exactly the sequence 1,2,…,count, the
    /// recorded sum must equal this (Gauss identity). Used as a sanity check
    /// in tests since the producer emits exactly that sequence.
    pub fn sequence_sum(&self) -> i64 {
        self.count * (self.count + 1) / 2
    }

    /// True if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
