//! Procedural rover terrain: low-discrepancy rock scatter, Gaussian bump fields,
//! and the heightfield containers they are stamped into.

mod descriptor;
mod error;
mod generator;
mod heightfield;

pub mod kernel;
pub mod sampler;
pub mod synth;

pub use descriptor::{Terrain, TerrainDescriptor};
pub use error::TerrainError;
pub use generator::{TerrainGenerator, TerrainKind};
pub use heightfield::HeightField;
pub use kernel::{Kernel, gaussian_profile, kernel_diameter};
pub use sampler::{GridPoint, HaltonSampler};
pub use synth::{
    GaussianScatterParams, RockScatterParams, ScatterReport, add_gaussian_bumps, add_rocks,
    cumulative_fractional_area, kernel_count, rock_count, stamp,
};
