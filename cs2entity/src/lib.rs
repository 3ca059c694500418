/// Command-line front-end converting CraftStudio models to Bedrock entity files
use anyhow::{bail, Context, Result};
use clap::Parser;
use cs2entity_core::{bedrock, convert, craftstudio};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cs2entity")]
#[command(
    version,
    about = "Convert a CraftStudio model (.csjsmodel) into Bedrock entity geometry"
)]
pub struct Cli {
    /// CraftStudio model to read
    pub input: PathBuf,

    /// Entity geometry file to write
    pub output: PathBuf,

    /// Legacy flag characters (r = replace)
    pub flags: Option<String>,

    /// Overwrite the output file if it already exists
    #[arg(short, long)]
    pub replace: bool,

    /// Write single-line JSON instead of pretty-printed output
    #[arg(long)]
    pub compact: bool,
}

impl Cli {
    /// True if either `--replace` or the legacy `r` flag was given
    pub fn replace(&self) -> bool {
        self.replace || self.flags.as_deref().is_some_and(|flags| flags.contains('r'))
    }
}

/// Outcome of a successful conversion
#[derive(Debug, Clone, Copy)]
pub struct Summary {
    pub blocks: usize,
    pub bones: usize,
    pub cubes: usize,
    pub elapsed: Duration,
}

/// Read, convert and write one model as described by `cli`
pub fn run(cli: &Cli) -> Result<Summary> {
    if !cli.input.is_file() {
        bail!("{} must be a file!", cli.input.display());
    }
    if cli.output.exists() && !cli.replace() {
        bail!("{} already exists!", cli.output.display());
    }

    let start = Instant::now();

    let file = File::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    let model = craftstudio::read_model(BufReader::new(file))
        .with_context(|| format!("Failed to read CraftStudio model {}", cli.input.display()))?;
    info!("CraftStudio model loaded.");

    let entity = convert(&model);
    info!("Model converted to Bedrock entity.");

    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    bedrock::write_model(&entity, BufWriter::new(file), cli.compact)
        .with_context(|| format!("Failed to write entity model {}", cli.output.display()))?;
    info!("Bedrock entity model written.");

    let (bones, cubes) = entity
        .iter()
        .fold((0, 0), |(bones, cubes), (_, geometry)| {
            (bones + geometry.len(), cubes + geometry.cube_count())
        });

    Ok(Summary {
        blocks: model.block_count(),
        bones,
        cubes,
        elapsed: start.elapsed(),
    })
}
