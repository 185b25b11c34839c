//! fanline - bounded-time fan-out/fan-in pipeline with conservation checking

use anyhow::Result;
use clap::Parser;

use fanline::PipelineBuilder;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    // Deadline 1s, 5 workers, 1ms per-item delay, combined channel bounded
    // to the worker count.
    let pipeline = PipelineBuilder::new().build()?;
    let report = pipeline.run().await?;

    println!(
        "count: {} {}",
        report.produced.count, report.collected.count
    );
    println!("sum: {} {}", report.produced.sum, report.collected.sum);

    // A mismatch propagates out as an error: non-zero exit with diagnostic.
    report.verify()?;

    Ok(())
}
