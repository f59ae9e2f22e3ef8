use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use trussx_joints::{AnalysisConfig, ForceRange, IndexBase, SolverConfig};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "trussx-joints",
    about = "Solve a statically determinate planar truss by the method of joints",
    version
)]
pub struct Cli {
    /// Truss description file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Node indices in the file start at 1 instead of 0
    #[arg(long)]
    pub one_based: bool,

    /// JSON configuration file; flags below override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also draw the solved truss as an SVG file
    #[arg(long, value_name = "FILE")]
    pub svg: Option<PathBuf>,

    /// Relative LU pivot threshold below which the system counts as singular
    #[arg(long, value_name = "TOL")]
    pub pivot_tolerance: Option<f64>,

    /// Forces at or below this magnitude are reported as zero
    #[arg(long, value_name = "TOL")]
    pub zero_tolerance: Option<f64>,

    /// Number of colours in the force palette
    #[arg(long, value_name = "N")]
    pub palette_size: Option<usize>,

    /// Force range mapped onto the palette, as MAX_COMPRESSION:MAX_TENSION
    #[arg(long, value_name = "MIN:MAX", value_parser = parse_range, allow_hyphen_values = true)]
    pub range: Option<ForceRange>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Report formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Cli {
    /// Merge the optional configuration file with command-line overrides.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?,
            None => AnalysisConfig::default(),
        };
        if self.one_based {
            config.index_base = IndexBase::One;
        }
        if let Some(pivot_tolerance) = self.pivot_tolerance {
            config.solver = SolverConfig { pivot_tolerance };
        }
        if let Some(tolerance) = self.zero_tolerance {
            config.zero_force_tolerance = tolerance;
        }
        if let Some(size) = self.palette_size {
            config.palette.size = size;
        }
        if self.range.is_some() {
            config.palette.range = self.range;
        }
        Ok(config)
    }
}

/// Parse `MIN:MAX` into a validated [`ForceRange`].
fn parse_range(text: &str) -> Result<ForceRange, String> {
    let (low, high) = text
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX, found {text:?}"))?;
    let low: f64 = low
        .trim()
        .parse()
        .map_err(|_| format!("invalid lower bound {low:?}"))?;
    let high: f64 = high
        .trim()
        .parse()
        .map_err(|_| format!("invalid upper bound {high:?}"))?;
    ForceRange::new(low, high).map_err(|error| error.to_string())
}
