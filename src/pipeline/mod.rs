//! Pipeline stages and wiring
//!
//! The pipeline is a chain of tokio tasks communicating only through
//! channels:
//!
//! ```text
//! Producer -> input channel -> { Worker 1..K } -> K output channels
//!          -> Collector merge -> combined channel -> Aggregator
//! ```
//!
//! Shutdown is a cascade of channel closes. A deadline signal stops the
//! producer, which drops the input sender; each worker drains the input and
//! drops its output sender; the collector's relays drain the worker outputs
//! and the combined channel closes once every relay has finished; the
//! aggregator drains the combined channel and the run is over. No stage
//! below the producer observes the deadline directly.
//!
//! # Example
//!
//! ```ignore
//! use fanline::PipelineBuilder;
//!
//! let pipeline = PipelineBuilder::new().workers(5).build()?;
//! let report = pipeline.run().await?;
//! println!("count: {} {}", report.produced.count, report.collected.count);
//! report.verify()?;
//! ```

mod aggregator;
mod builder;
pub mod collector;
mod executor;
mod producer;
pub mod verifier;
mod worker;

pub use aggregator::Aggregator;
pub use builder::PipelineBuilder;
pub use executor::{Pipeline, RunReport, RunState};
pub use producer::Producer;
pub use worker::{SharedReceiver, Worker, WorkerStats};
