//! Error types for fanline

use thiserror::Error;

use crate::config::ConfigError;

/// Pipeline error type
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The produced-side and collected-side tallies disagree after full
    /// drain. This indicates a correctness bug in the pipeline itself and is
    /// always fatal.
    #[error(
        "integrity mismatch: produced count={produced_count} sum={produced_sum}, \
         collected count={collected_count} sum={collected_sum}"
    )]
    IntegrityMismatch {
        /// Values emitted by the producer
        produced_count: i64,
        /// Sum of values emitted by the producer
        produced_sum: i64,
        /// Values drained by the aggregator
        collected_count: i64,
        /// Sum of values drained by the aggregator
        collected_sum: i64,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A pipeline task panicked or was cancelled
    #[error("pipeline task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
