//! Channel capacity configuration for the pipeline stages

use crate::config::ConfigError;

/// Channel buffer configuration for the pipeline stages
///
/// The shared input channel and the per-worker output channels default to
/// capacity 1, the closest tokio equivalent of an unbuffered rendezvous
/// channel: the producer blocks until a worker is ready, and each worker
/// blocks until its relay is ready. The combined channel defaults to one
/// slot per worker.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Shared input channel capacity (producer -> workers)
    pub input_buffer: usize,

    /// Per-worker output channel capacity (worker -> collector relay)
    pub worker_buffer: usize,

    /// Combined channel capacity (collector -> aggregator); defaults to the
    /// worker count when unset
    pub merge_buffer: Option<usize>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            input_buffer: 1,
            worker_buffer: 1,
            merge_buffer: None,
        }
    }
}

impl ChannelConfig {
    /// Set the shared input channel capacity
    pub fn with_input_buffer(mut self, size: usize) -> Self {
        self.input_buffer = size;
        self
    }

    /// Set the per-worker output channel capacity
    pub fn with_worker_buffer(mut self, size: usize) -> Self {
        self.worker_buffer = size;
        self
    }

    /// Set the combined channel capacity
    pub fn with_merge_buffer(mut self, size: usize) -> Self {
        self.merge_buffer = Some(size);
        self
    }

    /// Resolve the combined channel capacity for the given worker count
    pub fn merge_capacity(&self, workers: usize) -> usize {
        self.merge_buffer.unwrap_or(workers).max(1)
    }

    /// Validate the configuration
    ///
    /// tokio channels require a capacity of at least 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_buffer == 0 {
            return Err(ConfigError::InvalidBuffer(
                "input buffer must be at least 1".into(),
            ));
        }

        if self.worker_buffer == 0 {
            return Err(ConfigError::InvalidBuffer(
                "worker buffer must be at least 1".into(),
            ));
        }

        if self.merge_buffer == Some(0) {
            return Err(ConfigError::InvalidBuffer(
                "merge buffer must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
