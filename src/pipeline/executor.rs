//! Pipeline wiring and lifecycle

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, mpsc, Mutex};

use crate::channel::ChannelConfig;
use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::tally::{Tally, TallySnapshot};

use super::aggregator::Aggregator;
use super::collector;
use super::producer::Producer;
use super::verifier;
use super::worker::{Worker, WorkerStats};

/// Lifecycle states of a pipeline run
///
/// The transitions are driven by the close cascade: the deadline stops the
/// producer (Running -> Draining), the downstream stages finish in-flight
/// values until the combined channel is drained (Draining -> Terminated),
/// and the conservation check settles the verdict (Verified or Failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Producer is emitting, all stages active
    Running,
    /// Producer stopped; workers, relays, and aggregator drain in-flight values
    Draining,
    /// Combined channel closed and fully drained
    Terminated,
    /// Tallies matched
    Verified,
    /// Tallies mismatched
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Running => "running",
            RunState::Draining => "draining",
            RunState::Terminated => "terminated",
            RunState::Verified => "verified",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Pipeline manages one fan-out/fan-in run
///
/// Responsible for wiring the stages together, arming the deadline, and
/// collecting the final tallies. Use [`super::PipelineBuilder`] for
/// validated construction.
pub struct Pipeline {
    /// Pipeline configuration
    pub(crate) config: PipelineConfig,

    /// Channel capacities
    pub(crate) channels: ChannelConfig,

    /// Shutdown signal sender (observed by the producer only)
    pub(crate) shutdown_tx: broadcast::Sender<()>,
}

impl Pipeline {
    /// Create a new pipeline
    ///
    /// Use `PipelineBuilder` for a construction path that validates the
    /// configuration.
    pub fn new(config: PipelineConfig, channels: ChannelConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            channels,
            shutdown_tx,
        }
    }

    /// Trigger shutdown of the producer ahead of the deadline
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Get the pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline to completion
    ///
    /// Spawns the producer, worker pool, collector, and aggregator, arms the
    /// deadline, and waits for the close cascade to drain every stage.
    /// Returns the final [`RunReport`]; verification is the caller's step so
    /// the observable tallies can be reported before a mismatch aborts.
    pub async fn run(&self) -> PipelineResult<RunReport> {
        let start = Instant::now();

        tracing::info!(
            workers = self.config.workers,
            deadline_ms = self.config.deadline.as_millis() as u64,
            process_delay_us = self.config.process_delay.as_micros() as u64,
            state = %RunState::Running,
            "pipeline starting"
        );

        let produced = Arc::new(Tally::new());
        let collected = Arc::new(Tally::new());

        let (input_tx, input_rx) = mpsc::channel(self.channels.input_buffer);
        let shared_input = Arc::new(Mutex::new(input_rx));

        // The producer's receiver must exist before any signal is sent, or
        // the broadcast message is lost.
        let producer_shutdown = self.shutdown_tx.subscribe();

        // A zero deadline means "emit nothing": pre-signal so the producer's
        // first cancellation check already sees it.
        if self.config.deadline.is_zero() {
            let _ = self.shutdown_tx.send(());
        }

        let producer = {
            let tally = Arc::clone(&produced);
            Producer::new(input_tx, move |value| tally.record(value))
        };
        let producer_handle = tokio::spawn(producer.run(producer_shutdown));

        let mut worker_handles = Vec::with_capacity(self.config.workers);
        let mut worker_outputs = Vec::with_capacity(self.config.workers);
        for id in 0..self.config.workers {
            let (output_tx, output_rx) = mpsc::channel(self.channels.worker_buffer);
            worker_outputs.push(output_rx);

            let worker = Worker::new(
                id,
                Arc::clone(&shared_input),
                output_tx,
                self.config.process_delay,
            );
            worker_handles.push(tokio::spawn(worker.run()));
        }

        let merged = collector::merge(
            worker_outputs,
            self.channels.merge_capacity(self.config.workers),
        );
        let aggregator_handle =
            tokio::spawn(Aggregator::new(merged, Arc::clone(&collected)).run());

        // Deadline task: stops the producer; everything downstream drains
        // naturally through the close cascade.
        let deadline = self.config.deadline;
        let shutdown_tx = self.shutdown_tx.clone();
        let deadline_handle = tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            tracing::debug!("deadline fired, stopping producer");
            let _ = shutdown_tx.send(());
        });

        let emitted = producer_handle.await?;
        tracing::debug!(
            emitted,
            state = %RunState::Draining,
            "producer stopped, draining in-flight values"
        );

        let mut workers = Vec::with_capacity(worker_handles.len());
        for handle in worker_handles {
            let stats = handle.await?;
            tracing::debug!(worker_id = stats.id, relayed = stats.relayed, "worker joined");
            workers.push(stats);
        }

        let drained = aggregator_handle.await?;
        deadline_handle.abort();

        // Both recording sides have quiesced: the producer joined before its
        // tally was read, and the aggregator joined before the collected
        // tally was read.
        let report = RunReport {
            produced: produced.snapshot(),
            collected: collected.snapshot(),
            elapsed: start.elapsed(),
            workers,
        };

        tracing::info!(
            produced_count = report.produced.count,
            collected_count = report.collected.count,
            drained,
            elapsed_ms = report.elapsed.as_millis() as u64,
            state = %RunState::Terminated,
            "pipeline drained"
        );

        Ok(report)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("channels", &self.channels)
            .finish()
    }
}

/// Final report of a pipeline run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Tally recorded by the producer's emit observer
    pub produced: TallySnapshot,

    /// Tally recorded by the aggregator
    pub collected: TallySnapshot,

    /// Wall-clock duration of the run
    pub elapsed: Duration,

    /// Per-worker relay statistics
    pub workers: Vec<WorkerStats>,
}

impl RunReport {
    /// True if the produced and collected tallies match
    pub fn is_balanced(&self) -> bool {
        self.produced == self.collected
    }

    /// Run the conservation check, settling the final verdict
    pub fn verify(&self) -> PipelineResult<()> {
        match verifier::check(self.produced, self.collected) {
            Ok(()) => {
                tracing::info!(state = %RunState::Verified, "tallies match");
                Ok(())
            }
            Err(e) => {
                tracing::error!(state = %RunState::Failed, error = %e, "tally mismatch");
                Err(e)
            }
        }
    }
}
