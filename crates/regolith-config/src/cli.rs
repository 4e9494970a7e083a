//! Command-line argument parsing for the terrain tools.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, GeneratorKind};

/// Regolith command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "regolith", about = "Procedural rover terrain generator")]
pub struct CliArgs {
    /// Terrain length in meters.
    #[arg(long)]
    pub length: Option<f64>,

    /// Terrain width in meters.
    #[arg(long)]
    pub width: Option<f64>,

    /// Meters between grid samples.
    #[arg(long)]
    pub horizontal_scale: Option<f64>,

    /// Meters per raw height unit.
    #[arg(long)]
    pub vertical_scale: Option<f64>,

    /// RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Features to generate.
    #[arg(long, value_enum)]
    pub kind: Option<GeneratorKind>,

    /// Slope threshold for vertical-face correction.
    #[arg(long, conflicts_with = "no_slope_correction")]
    pub slope_threshold: Option<f64>,

    /// Keep every vertex on the regular grid.
    #[arg(long)]
    pub no_slope_correction: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(length) = args.length {
            self.terrain.length = length;
        }
        if let Some(width) = args.width {
            self.terrain.width = width;
        }
        if let Some(hs) = args.horizontal_scale {
            self.terrain.horizontal_scale = hs;
        }
        if let Some(vs) = args.vertical_scale {
            self.terrain.vertical_scale = vs;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if let Some(kind) = args.kind {
            self.terrain.kind = kind;
        }
        if let Some(threshold) = args.slope_threshold {
            self.mesh.slope_threshold = Some(threshold);
        }
        if args.no_slope_correction {
            self.mesh.slope_threshold = None;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
