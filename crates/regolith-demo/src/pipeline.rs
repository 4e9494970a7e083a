//! Config-driven generation: descriptor, synthesis, quantisation, meshing.

use glam::Vec3;
use regolith_config::{Config, GaussianConfig, GeneratorKind, RockConfig};
use regolith_mesh::{MeshError, TriMesh, TriangleMeshSink, convert_heightfield_to_trimesh};
use regolith_terrain::{
    GaussianScatterParams, RockScatterParams, TerrainDescriptor, TerrainError, TerrainGenerator,
    TerrainKind,
};
use tracing::info;

use crate::scene::SinkError;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("terrain: {0}")]
    Terrain(#[from] TerrainError),
    #[error("mesh: {0}")]
    Mesh(#[from] MeshError),
    #[error("scene: {0}")]
    Scene(#[from] SinkError),
}

pub fn terrain_kind(kind: GeneratorKind) -> TerrainKind {
    match kind {
        GeneratorKind::Flat => TerrainKind::Flat,
        GeneratorKind::Rocks => TerrainKind::Rocks,
        GeneratorKind::Gaussian => TerrainKind::Gaussian,
        GeneratorKind::GaussianWithRocks => TerrainKind::GaussianWithRocks,
    }
}

pub fn rock_params(rocks: &RockConfig) -> RockScatterParams {
    RockScatterParams {
        coverage: rocks.coverage,
        min_diameter: rocks.min_diameter,
        min_height: rocks.min_height,
        max_height: rocks.max_height,
        per_rock_height: rocks.per_rock_height,
    }
}

pub fn gaussian_params(gaussian: &GaussianConfig) -> GaussianScatterParams {
    GaussianScatterParams {
        radius: gaussian.radius,
        max_height: gaussian.max_height,
        sigma: gaussian.sigma,
    }
}

/// Build the terrain described by `config`, mesh it and submit the mesh to
/// `sink`. Returns the mesh for reporting.
pub fn run<S>(config: &Config, sink: &mut S) -> Result<TriMesh, RunError>
where
    S: TriangleMeshSink<Error = SinkError>,
{
    let terrain_cfg = &config.terrain;
    let descriptor = TerrainDescriptor::new(
        terrain_cfg.name.clone(),
        terrain_cfg.length,
        terrain_cfg.width,
        terrain_cfg.horizontal_scale,
        terrain_cfg.vertical_scale,
    )?;
    info!(
        "Terrain '{}': {}x{} samples over {} m x {} m",
        descriptor.name(),
        descriptor.num_rows(),
        descriptor.num_cols(),
        descriptor.length(),
        descriptor.width()
    );

    let terrain = TerrainGenerator::new(terrain_cfg.seed)
        .with_rocks(rock_params(&config.rocks))
        .with_gaussian(gaussian_params(&config.gaussian))
        .generate(descriptor, terrain_kind(terrain_cfg.kind))?;

    let mut height_field = terrain.into_height_field();
    if config.debug.quantize {
        height_field = height_field.quantize();
    }
    let (lo, hi) = height_field.min_max();
    info!(
        "Raw heights in [{lo}, {hi}] ({:.3} m relief)",
        (hi - lo) * height_field.vertical_scale()
    );

    let mesh = convert_heightfield_to_trimesh(&height_field, config.mesh.slope_threshold)?;
    mesh.submit(sink, Vec3::from_array(config.mesh.translation))?;
    Ok(mesh)
}
