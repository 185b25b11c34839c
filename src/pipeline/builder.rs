//! Builder pattern for Pipeline construction

use std::time::Duration;

use crate::channel::ChannelConfig;
use crate::config::PipelineConfig;
use crate::error::PipelineResult;

use super::executor::Pipeline;

/// Builder for creating a Pipeline with validated configuration
///
/// # Example
///
/// ```ignore
/// let pipeline = PipelineBuilder::new()
///     .workers(5)
///     .deadline(Duration::from_secs(1))
///     .process_delay(Duration::from_millis(1))
///     .build()?;
/// ```
pub struct PipelineBuilder {
    config: PipelineConfig,
    channels: ChannelConfig,
}

impl PipelineBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            channels: ChannelConfig::default(),
        }
    }

    /// Set the full pipeline configuration
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the worker pool size
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set the producer deadline
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.config.deadline = deadline;
        self
    }

    /// Set the per-item processing delay
    pub fn process_delay(mut self, delay: Duration) -> Self {
        self.config.process_delay = delay;
        self
    }

    /// Set the channel capacity configuration
    pub fn channel_config(mut self, channels: ChannelConfig) -> Self {
        self.channels = channels;
        self
    }

    /// Build the pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn build(self) -> PipelineResult<Pipeline> {
        self.config.validate()?;
        self.channels.validate()?;

        Ok(Pipeline::new(self.config, self.channels))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let pipeline = PipelineBuilder::new().build().unwrap();
        assert_eq!(pipeline.config().workers, 5);
        assert_eq!(pipeline.config().deadline, Duration::from_secs(1));
    }

    #[test]
    fn test_builder_setters() {
        let pipeline = PipelineBuilder::new()
            .workers(2)
            .deadline(Duration::from_millis(10))
            .process_delay(Duration::ZERO)
            .build()
            .unwrap();

        assert_eq!(pipeline.config().workers, 2);
        assert_eq!(pipeline.config().deadline, Duration::from_millis(10));
        assert_eq!(pipeline.config().process_delay, Duration::ZERO);
    }

    #[test]
    fn test_builder_rejects_zero_workers() {
        let result = PipelineBuilder::new().workers(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_zero_buffers() {
        let result = PipelineBuilder::new()
            .channel_config(ChannelConfig::default().with_input_buffer(0))
            .build();
        assert!(result.is_err());
    }
}
