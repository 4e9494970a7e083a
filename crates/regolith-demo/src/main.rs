//! Generates a rover terrain patch and hands its collision mesh to a scene.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p regolith-demo -- --kind gaussian-with-rocks --seed 7`.

mod pipeline;
mod scene;

use std::process::ExitCode;

use clap::Parser;
use regolith_config::{CliArgs, Config};
use tracing::{error, info};

use crate::scene::SceneSummary;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match Config::resolve_dir(args.config.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    regolith_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let mut scene = SceneSummary::default();
    match pipeline::run(&config, &mut scene) {
        Ok(mesh) => {
            info!(
                meshes = scene.mesh_count(),
                vertices = scene.total_vertices(),
                triangles = scene.total_triangles(),
                "Terrain ready"
            );
            if let Some((lo, hi)) = mesh.bounds() {
                info!("Mesh bounds: min={lo}, max={hi}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Terrain generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
