//! fanline: a bounded-time fan-out/fan-in numeric pipeline
//!
//! One producer emits the sequence 1,2,3,… onto a shared input channel for a
//! fixed duration. A pool of workers races to consume and relay the values,
//! each simulating per-item processing cost. A collector merges the worker
//! outputs back into a single stream, which an aggregator drains into a
//! count/sum tally. After the pipeline quiesces, the produced-side tally is
//! checked against the collected-side tally: any discrepancy means a value
//! was lost, duplicated, or miscounted somewhere in the concurrent stages.
//!
//! The crate provides:
//!
//! - Pipeline stages (producer, worker, collector, aggregator, verifier)
//! - Wiring and lifecycle management ([`pipeline::Pipeline`])
//! - Atomic count/sum accumulators ([`tally::Tally`])
//! - Configuration and validation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod tally;

pub use channel::ChannelConfig;
pub use config::{ConfigError, PipelineConfig};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{
    Aggregator, Pipeline, PipelineBuilder, Producer, RunReport, RunState, Worker, WorkerStats,
};
pub use tally::{Tally, TallySnapshot};
