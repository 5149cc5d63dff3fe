//! Walk a region of an N-dimensional buffer and report the traversal.
//!
//! Run from the workspace root:
//!   cargo run -p nd-gallery --bin nd_walk -- --help
//!   cargo run -p nd-gallery --bin nd_walk -- --size 8,12 --direction 1
//!   cargo run -p nd-gallery --bin nd_walk -- --config walk.json --reverse

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nd_gallery::{WalkConfig, load_config, run_walk};

#[derive(Parser, Debug)]
#[command(name = "nd_walk")]
#[command(about = "Walk a region of an N-dimensional buffer line by line")]
struct Cli {
    /// JSON walk configuration; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Buffered region extents, dimension 0 first (e.g. 8,12)
    #[arg(long, value_delimiter = ',')]
    size: Option<Vec<usize>>,

    /// Buffered region origin (defaults to zeros)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    origin: Option<Vec<isize>>,

    /// Walked region origin (defaults to the buffered origin)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    region_origin: Option<Vec<isize>>,

    /// Walked region extents (defaults to the buffered extents)
    #[arg(long, value_delimiter = ',')]
    region_size: Option<Vec<usize>>,

    /// Active direction of the linear walk
    #[arg(long)]
    direction: Option<usize>,

    /// Walk from the last index back to the first
    #[arg(long, default_value_t = false)]
    reverse: bool,

    /// Write the JSON report here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => WalkConfig::default(),
    };
    apply_overrides(&mut config, &cli);

    let report = run_walk(&config)?;
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;

    match &cli.out {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn apply_overrides(config: &mut WalkConfig, cli: &Cli) {
    if let Some(size) = &cli.size {
        config.buffered_size = size.clone();
        if cli.origin.is_none() && config.buffered_origin.len() != size.len() {
            config.buffered_origin = vec![0; size.len()];
        }
    }
    if let Some(origin) = &cli.origin {
        config.buffered_origin = origin.clone();
    }
    if cli.region_origin.is_some() {
        config.region_origin = cli.region_origin.clone();
    }
    if cli.region_size.is_some() {
        config.region_size = cli.region_size.clone();
    }
    if let Some(direction) = cli.direction {
        config.direction = direction;
    }
    if cli.reverse {
        config.reverse = true;
    }
}
