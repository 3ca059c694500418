/// cs2entity - CraftStudio to Bedrock entity geometry converter
///
/// Usage: cs2entity <csjsmodel_path> <entity_path> [flags (r=replace)]
///
/// Logging goes to stderr and honours RUST_LOG (default: info).

use anyhow::Result;
use clap::Parser;
use cs2entity::{run, Cli};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let summary = run(&cli)?;

    info!(
        "Converted {} blocks into {} bones with {} cubes",
        summary.blocks, summary.bones, summary.cubes
    );
    info!("Done! ({} ms)", summary.elapsed.as_millis());
    Ok(())
}
