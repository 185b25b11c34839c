//! Worker relay tasks

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, Mutex};

/// Shared read end of the input channel
///
/// Workers race to receive from the single input channel; the mutex hands
/// each value to exactly one worker. The lock is held only across one
/// `recv().await`, never across the processing delay or the forward, so
/// workers still overlap their simulated processing.
pub type SharedReceiver = Arc<Mutex<mpsc::Receiver<i64>>>;

/// Worker pulls values from the shared input channel and relays them
/// unchanged to its own output channel, after a fixed simulated processing
/// delay per value
///
/// Each worker is the sole owner of its output channel's write end; the
/// channel closes exactly once, when the worker drops the sender after
/// exhausting the input. The relative order of the values a worker receives
/// is preserved on its output.
pub struct Worker {
    id: usize,
    input: SharedReceiver,
    output: mpsc::Sender<i64>,
    delay: Duration,
}

impl Worker {
    /// Create a new worker
    pub fn new(id: usize, input: SharedReceiver, output: mpsc::Sender<i64>, delay: Duration) -> Self {
        Self {
            id,
            input,
            output,
            delay,
        }
    }

    /// Run the worker loop until the input channel is closed and drained
    pub async fn run(self) -> WorkerStats {
        let mut stats = WorkerStats::new(self.id);
        stats.start();

        tracing::debug!(worker_id = self.id, "worker started");

        loop {
            let value = {
                let mut input = self.input.lock().await;
                input.recv().await
            };

            let Some(value) = value else {
                tracing::debug!(worker_id = self.id, "input exhausted, worker stopping");
                break;
            };

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            if self.output.send(value).await.is_err() {
                tracing::debug!(worker_id = self.id, "output channel closed, worker stopping");
                break;
            }

            stats.record_relay();
        }

        stats.stop();
        tracing::debug!(
            worker_id = self.id,
            relayed = stats.relayed,
            elapsed_ms = ?stats.elapsed().map(|d| d.as_millis()),
            "worker finished"
        );

        // Dropping `self.output` here closes this worker's output channel.
        stats
    }

    /// Get the worker ID
    pub fn id(&self) -> usize {
        self.id
    }
}

/// Statistics tracked by each worker
#[derive(Debug, Clone)]
pub struct WorkerStats {
    /// Worker identifier
    pub id: usize,

    /// Number of values relayed to the output channel
    pub relayed: u64,

    /// Worker start time
    pub started_at: Option<Instant>,

    /// Worker end time
    pub ended_at: Option<Instant>,
}

impl WorkerStats {
    /// Create new empty stats for the given worker
    pub fn new(id: usize) -> Self {
        Self {
            id,
            relayed: 0,
            started_at: None,
            ended_at: None,
        }
    }

    /// Start tracking (records start time)
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Stop tracking (records end time)
    pub fn stop(&mut self) {
        self.ended_at = Some(Instant::now());
    }

    /// Record one relayed value
    pub fn record_relay(&mut self) {
        self.relayed += 1;
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|start| {
            self.ended_at
                .map(|end| end.duration_since(start))
                .unwrap_or_else(|| start.elapsed())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_stats_defaults() {
        let stats = WorkerStats::new(3);
        assert_eq!(stats.id, 3);
        assert_eq!(stats.relayed, 0);
        assert!(stats.started_at.is_none());
        assert!(stats.ended_at.is_none());
        assert!(stats.elapsed().is_none());
    }

    #[test]
    fn test_worker_stats_record_relay() {
        let mut stats = WorkerStats::new(0);
        stats.record_relay();
        stats.record_relay();
        assert_eq!(stats.relayed, 2);
    }

    #[test]
    fn test_worker_stats_start_stop() {
        let mut stats = WorkerStats::new(0);
        stats.start();
        std::thread::sleep(Duration::from_millis(5));
        stats.stop();

        assert!(stats.elapsed().unwrap() >= Duration::from_millis(5));
    }

    #[tokio::test]
    async fn worker_relays_values_unchanged() {
        let (in_tx, in_rx) = mpsc::channel(1);
        let (out_tx, mut out_rx) = mpsc::channel(1);

        let worker = Worker::new(0, Arc::new(Mutex::new(in_rx)), out_tx, Duration::ZERO);
        let handle = tokio::spawn(worker.run());

        tokio::spawn(async move {
            for value in [7i64, -3, 42] {
                in_tx.send(value).await.unwrap();
            }
        });

        let mut seen = Vec::new();
        while let Some(value) = out_rx.recv().await {
            seen.push(value);
        }

        let stats = handle.await.unwrap();
        assert_eq!(seen, vec![7, -3, 42]);
        assert_eq!(stats.relayed, 3);
    }

    #[tokio::test]
    async fn worker_closes_output_on_empty_input() {
        let (in_tx, in_rx) = mpsc::channel::<i64>(1);
        let (out_tx, mut out_rx) = mpsc::channel(1);
        drop(in_tx);

        let worker = Worker::new(0, Arc::new(Mutex::new(in_rx)), out_tx, Duration::from_millis(1));
        let stats = worker.run().await;

        assert_eq!(stats.relayed, 0);
        assert!(out_rx.recv().await.is_none());
    }
}
