//! Sequence producer

use tokio::sync::{broadcast, mpsc};

/// Producer emits the sequence 1,2,3,… onto the shared input channel
///
/// The producer is the sole owner of the input channel's write end; the
/// channel closes exactly once, when the producer drops its sender on exit.
/// An observer callback is invoked once per delivered value, immediately
/// after the send completes and before the next cancellation check, so the
/// produced-side tally can never include a value that was not handed to a
/// worker, nor miss one that was.
pub struct Producer<F> {
    output: mpsc::Sender<i64>,
    on_emit: F,
}

impl<F> Producer<F>
where
    F: Fn(i64),
{
    /// Create a new producer writing to `output`
    pub fn new(output: mpsc::Sender<i64>, on_emit: F) -> Self {
        Self { output, on_emit }
    }

    /// Run the producer loop until the shutdown signal fires
    ///
    /// Returns the number of values emitted. The shutdown branch is polled
    /// first on every iteration; if it fires while a send is still pending,
    /// the send future is dropped before delivering, so the value is neither
    /// handed to a worker nor counted.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> u64 {
        let mut next: i64 = 1;
        let mut emitted: u64 = 0;

        tracing::debug!("producer started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::debug!(emitted, "producer received shutdown signal");
                    break;
                }

                result = self.output.send(next) => {
                    if result.is_err() {
                        // All workers are gone; nothing left to produce for.
                        tracing::debug!(emitted, "input channel closed, producer stopping");
                        break;
                    }
                    (self.on_emit)(next);
                    next += 1;
                    emitted += 1;
                }
            }
        }

        // Dropping `self.output` here closes the input channel.
        emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::Tally;
    use std::sync::Arc;

    #[tokio::test]
    async fn producer_emits_increasing_sequence() {
        let (tx, mut rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let tally = Arc::new(Tally::new());
        let producer = {
            let tally = Arc::clone(&tally);
            Producer::new(tx, move |value| tally.record(value))
        };
        let handle = tokio::spawn(producer.run(shutdown_rx));

        let mut received = Vec::new();
        for _ in 0..10 {
            received.push(rx.recv().await.unwrap());
        }
        let _ = shutdown_tx.send(());

        // Drain anything still in flight so the producer can exit its send.
        while rx.recv().await.is_some() {}

        let emitted = handle.await.unwrap();
        assert_eq!(received, (1..=10).collect::<Vec<i64>>());

        // Every delivered value was counted, and only delivered values.
        let snap = tally.snapshot();
        assert_eq!(snap.count as u64, emitted);
        assert_eq!(snap.sum, snap.sequence_sum());
    }

    #[tokio::test]
    async fn producer_stops_without_emitting_when_preempted() {
        let (tx, mut rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        // Signal before the producer runs: the biased select sees the queued
        // message before attempting the first send.
        let _ = shutdown_tx.send(());

        let tally = Arc::new(Tally::new());
        let producer = {
            let tally = Arc::clone(&tally);
            Producer::new(tx, move |value| tally.record(value))
        };
        let emitted = producer.run(shutdown_rx).await;

        assert_eq!(emitted, 0);
        assert!(tally.snapshot().is_empty());

        // The input channel must still end up closed.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn producer_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
        drop(rx);

        let producer = Producer::new(tx, |_| {});
        let emitted = producer.run(shutdown_rx).await;

        assert_eq!(emitted, 0);
    }
}
