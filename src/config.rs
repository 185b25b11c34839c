//! Pipeline configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pipeline configuration
///
/// Defines how a pipeline run behaves: the size of the worker pool, how long
/// the producer keeps emitting, and the simulated per-item processing cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of concurrent worker tasks
    pub workers: usize,

    /// How long the producer emits before the cancellation signal fires
    pub deadline: Duration,

    /// Simulated per-item processing delay applied by each worker
    pub process_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            deadline: Duration::from_secs(1),
            process_delay: Duration::from_millis(1),
        }
    }
}

impl PipelineConfig {
    /// Create a new config with the given worker count
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    /// Set the producer deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Set the per-item processing delay
    pub fn with_process_delay(mut self, delay: Duration) -> Self {
        self.process_delay = delay;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkers(
                "worker count must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count: {0}")]
    InvalidWorkers(String),

    /// Invalid channel buffer capacity
    #[error("Invalid channel buffer: {0}")]
    InvalidBuffer(String),
}
