//! Final aggregation of the combined stream

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::tally::Tally;

/// Aggregator drains the combined channel into the collected-side tally
///
/// Makes no assumption about value order; terminates when the combined
/// channel is closed and drained, which the collector guarantees happens
/// only after every relay has finished.
pub struct Aggregator {
    input: mpsc::Receiver<i64>,
    tally: Arc<Tally>,
}

impl Aggregator {
    /// Create a new aggregator reading from `input`
    pub fn new(input: mpsc::Receiver<i64>, tally: Arc<Tally>) -> Self {
        Self { input, tally }
    }

    /// Drain the combined channel, recording every value
    ///
    /// Returns the number of values drained.
    pub async fn run(mut self) -> u64 {
        let mut drained: u64 = 0;

        while let Some(value) = self.input.recv().await {
            self.tally.record(value);
            drained += 1;
        }

        tracing::debug!(drained, "aggregator finished");
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn aggregator_tallies_all_values() {
        let (tx, rx) = mpsc::channel(4);
        let tally = Arc::new(Tally::new());
        let aggregator = Aggregator::new(rx, Arc::clone(&tally));

        let handle = tokio::spawn(aggregator.run());
        for value in [4i64, 1, 3, 2] {
            tx.send(value).await.unwrap();
        }
        drop(tx);

        let drained = handle.await.unwrap();
        assert_eq!(drained, 4);

        let snap = tally.snapshot();
        assert_eq!(snap.count, 4);
        assert_eq!(snap.sum, 10);
    }

    #[tokio::test]
    async fn aggregator_handles_empty_stream() {
        let (tx, rx) = mpsc::channel::<i64>(1);
        drop(tx);

        let tally = Arc::new(Tally::new());
        let drained = Aggregator::new(rx, Arc::clone(&tally)).run().await;

        assert_eq!(drained, 0);
        assert!(tally.snapshot().is_empty());
    }
}
