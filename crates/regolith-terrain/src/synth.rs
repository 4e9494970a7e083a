//! Heightfield synthesis: rock scatter and Gaussian bump fields.
//!
//! Both strategies place features at Halton sample points and add them onto
//! the heightfield with [`stamp`]. Stamps that overhang the grid are cropped
//! to the overlapping window, never wrapped and never rejected.

use rand::Rng;
use tracing::{debug, trace};

use crate::descriptor::Terrain;
use crate::error::{TerrainError, ensure_non_negative, ensure_positive};
use crate::heightfield::HeightField;
use crate::kernel::{Kernel, kernel_diameter};
use crate::sampler::{GridPoint, HaltonSampler};

/// Side length, in cells, of a single rock bump.
const ROCK_FOOTPRINT: usize = 2;

/// Rock size-frequency parameters and bump heights.
#[derive(Clone, Debug, PartialEq)]
pub struct RockScatterParams {
    /// Total fractional area covered by rocks (`k`). Default: 0.15.
    pub coverage: f64,
    /// Smallest rock diameter counted by the size-frequency model, in meters.
    /// Default: 0.1.
    pub min_diameter: f64,
    /// Lower bound of the bump height, in meters. Default: 0.1.
    pub min_height: f64,
    /// Upper bound of the bump height, in meters. Default: 0.2.
    pub max_height: f64,
    /// Draw a fresh height for every rock instead of one per call.
    /// Default: false.
    pub per_rock_height: bool,
}

impl Default for RockScatterParams {
    fn default() -> Self {
        Self {
            coverage: 0.15,
            min_diameter: 0.1,
            min_height: 0.1,
            max_height: 0.2,
            per_rock_height: false,
        }
    }
}

impl RockScatterParams {
    /// Check every field before any sample is written.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !(self.coverage.is_finite() && self.coverage > 0.0 && self.coverage <= 1.0) {
            return Err(TerrainError::InvalidCoverage(self.coverage));
        }
        ensure_non_negative("rock min_diameter", self.min_diameter)?;
        if !(self.min_height.is_finite()
            && self.max_height.is_finite()
            && self.min_height <= self.max_height)
        {
            return Err(TerrainError::InvalidHeightRange {
                min: self.min_height,
                max: self.max_height,
            });
        }
        Ok(())
    }
}

/// Gaussian bump field parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianScatterParams {
    /// Bump radius in meters. Default: 15.
    pub radius: f64,
    /// Bumps are scaled by a uniform draw from `[-max_height, max_height]`
    /// meters. Default: 5.
    pub max_height: f64,
    /// Spread of the Gaussian profile over `[-1, 1]`. Default: 0.4.
    pub sigma: f64,
}

impl Default for GaussianScatterParams {
    fn default() -> Self {
        Self {
            radius: 15.0,
            max_height: 5.0,
            sigma: 0.4,
        }
    }
}

impl GaussianScatterParams {
    pub fn validate(&self) -> Result<(), TerrainError> {
        ensure_positive("gaussian radius", self.radius)?;
        ensure_non_negative("gaussian max_height", self.max_height)?;
        ensure_positive("sigma", self.sigma)?;
        Ok(())
    }
}

/// Outcome of a scatter pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScatterReport {
    /// Number of features placed (one per sample point).
    pub placements: usize,
    /// Number of height samples written, counting overlaps once per stamp.
    pub cells_written: usize,
}

/// Cumulative fractional area covered by rocks larger than `diameter`, for a
/// total rock coverage `k`: `k * exp(-(1.79 + 1.52 / k) * D)`.
pub fn cumulative_fractional_area(k: f64, diameter: f64) -> f64 {
    let q = 1.79 + 1.52 / k;
    k * (-q * diameter).exp()
}

/// Number of rocks to place on `area` square meters.
pub fn rock_count(area: f64, k: f64, diameter: f64) -> usize {
    (area * cumulative_fractional_area(k, diameter)).round() as usize
}

/// Number of Gaussian bumps on a `length x width` patch: the patch area over
/// the square footprint of one bump.
pub fn kernel_count(length: f64, width: f64, radius: f64) -> usize {
    let footprint = 2.0 * radius;
    ((length / footprint) * (width / footprint)).floor() as usize
}

/// Add `kernel * scale` onto `hf` with the kernel's top-left cell at
/// `(top, left)`, which may lie outside the grid.
///
/// Only the overlapping window is written; the kernel sub-window keeps the
/// same offset relative to the destination. Returns the number of samples
/// written.
pub fn stamp(hf: &mut HeightField, top: i64, left: i64, kernel: &Kernel, scale: f64) -> usize {
    let size = kernel.size() as i64;
    let row_start = top.max(0);
    let row_end = (top + size).min(hf.num_rows() as i64);
    let col_start = left.max(0);
    let col_end = (left + size).min(hf.num_cols() as i64);
    if row_start >= row_end || col_start >= col_end {
        return 0;
    }

    let k_col_start = (col_start - left) as usize;
    let width = (col_end - col_start) as usize;
    for row in row_start..row_end {
        let k_row = kernel.row((row - top) as usize);
        let weights = &k_row[k_col_start..k_col_start + width];
        let dst = &mut hf.row_mut(row as usize)[col_start as usize..col_end as usize];
        for (h, &w) in dst.iter_mut().zip(weights) {
            *h += w * scale;
        }
    }

    (row_end - row_start) as usize * width
}

/// Scatter flat 2x2 rock bumps over the terrain.
///
/// The rock count follows [`rock_count`] for the terrain area. Positions come
/// from an unscrambled Halton sequence; heights are drawn from `rng` within
/// `[min_height, max_height]` and converted to raw units.
///
/// # Errors
///
/// Returns an error from [`RockScatterParams::validate`]; the heightfield is
/// untouched in that case.
pub fn add_rocks<R: Rng + ?Sized>(
    terrain: &mut Terrain,
    params: &RockScatterParams,
    rng: &mut R,
) -> Result<ScatterReport, TerrainError> {
    params.validate()?;

    let desc = terrain.descriptor();
    let n_rocks = rock_count(desc.area(), params.coverage, params.min_diameter);
    let (rows, cols) = (desc.num_rows(), desc.num_cols());
    let inv_vertical = 1.0 / desc.vertical_scale();

    let points = HaltonSampler::new().random(n_rocks);
    let mut height = rng.random_range(params.min_height..=params.max_height);
    let mut report = ScatterReport::default();

    let hf = terrain.height_field_mut();
    for point in points {
        if params.per_rock_height {
            height = rng.random_range(params.min_height..=params.max_height);
        }
        let at = GridPoint::from_unit(point, rows, cols);
        let bump = Kernel::constant(ROCK_FOOTPRINT, height);
        let written = stamp(hf, at.row as i64, at.col as i64, &bump, inv_vertical);
        trace!(row = at.row, col = at.col, height, written, "rock stamped");
        report.placements += 1;
        report.cells_written += written;
    }

    debug!(
        rocks = report.placements,
        cells = report.cells_written,
        coverage = params.coverage,
        min_diameter = params.min_diameter,
        "rock scatter complete"
    );
    Ok(report)
}

/// Scatter Gaussian bumps of random sign and amplitude over the terrain.
///
/// One kernel is built per call and stamped centred on every Halton sample,
/// scaled by a uniform draw from `[-max_height, max_height]` meters converted
/// to raw units.
///
/// # Errors
///
/// Returns an error from [`GaussianScatterParams::validate`] or
/// [`kernel_diameter`]; the heightfield is untouched in that case.
pub fn add_gaussian_bumps<R: Rng + ?Sized>(
    terrain: &mut Terrain,
    params: &GaussianScatterParams,
    rng: &mut R,
) -> Result<ScatterReport, TerrainError> {
    params.validate()?;

    let desc = terrain.descriptor();
    let diameter = kernel_diameter(params.radius, desc.horizontal_scale())?;
    let n_kernels = kernel_count(desc.length(), desc.width(), params.radius);
    if n_kernels == 0 {
        debug!(diameter, "gaussian scatter skipped: bump wider than terrain");
        return Ok(ScatterReport::default());
    }
    let kernel = Kernel::gaussian(diameter, params.sigma)?;
    let half = kernel.half_width() as i64;
    let (rows, cols) = (desc.num_rows(), desc.num_cols());
    let inv_vertical = 1.0 / desc.vertical_scale();

    let points = HaltonSampler::new().random(n_kernels);
    let mut report = ScatterReport::default();

    let hf = terrain.height_field_mut();
    for point in points {
        let at = GridPoint::from_unit(point, rows, cols);
        let amplitude = rng.random_range(-params.max_height..=params.max_height);
        let top = at.row as i64 - half;
        let left = at.col as i64 - half;
        let written = stamp(hf, top, left, &kernel, amplitude * inv_vertical);
        trace!(row = at.row, col = at.col, amplitude, written, "gaussian bump stamped");
        report.placements += 1;
        report.cells_written += written;
    }

    debug!(
        bumps = report.placements,
        diameter,
        cells = report.cells_written,
        "gaussian scatter complete"
    );
    Ok(report)
}
