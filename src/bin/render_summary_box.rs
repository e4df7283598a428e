//! Render a Summary Box from Request Summary Files
//!
//! Aggregates every request summary in the given JSON files and writes the
//! summary box into a container file, then prints the rows as JSON.
//! Run with: cargo run --bin render_summary_box -- requests.json [more.json ...]
//!
//! Environment:
//! - SUMMARY_SINK_CONFIG: JSON file with `output_dir` / `extension`
//! - SUMMARY_OUTPUT_DIR: overrides `output_dir` (default `summary_out`)
//! - SUMMARY_CONTAINER: container id (default `summary_box`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use wmstats_summary_box::{
    render_summary_box, summary_rows, ContainerRef, FileSink, FileSinkConfig, JsonFormatter,
    RequestSummary,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let inputs: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if inputs.is_empty() {
        anyhow::bail!("usage: render_summary_box <summary.json> [summary.json ...]");
    }

    let mut config = match std::env::var("SUMMARY_SINK_CONFIG") {
        Ok(path) => FileSinkConfig::load(&PathBuf::from(path))?,
        Err(_) => FileSinkConfig::default(),
    };
    if let Ok(dir) = std::env::var("SUMMARY_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    let container = ContainerRef::new(
        std::env::var("SUMMARY_CONTAINER").unwrap_or_else(|_| "summary_box".to_string()),
    );

    let mut summaries = Vec::new();
    for path in &inputs {
        let loaded = RequestSummary::load(path)?;
        tracing::info!("Loaded {} request summaries from {:?}", loaded.len(), path);
        summaries.extend(loaded);
    }
    let summary = RequestSummary::aggregate(&summaries);

    let mut sink = FileSink::new(config);
    let target = sink.create_container(&container)?;
    render_summary_box(&summary, &mut sink, &container)
        .with_context(|| format!("Failed to render summary box into {:?}", target))?;
    tracing::info!("Wrote summary box for {} requests to {:?}", summary.length, target);

    let rows = summary_rows(&summary)?;
    println!("{}", JsonFormatter::format(&rows)?);
    Ok(())
}
