//! Terrain synthesis error types.

/// Errors raised when a terrain descriptor or generation parameter violates
/// its preconditions. Every check runs before any height sample is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// A scale, extent, radius or spread was zero, negative, NaN or infinite.
    #[error("{name} must be finite and greater than zero, got {value}")]
    NonPositive {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A parameter that may be zero was negative or not finite.
    #[error("{name} must be finite and non-negative, got {value}")]
    Negative {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Rounding the extents to whole cells left no rows or no columns.
    #[error("terrain {length} x {width} m at {horizontal_scale} m/cell yields an empty {rows}x{cols} grid")]
    EmptyGrid {
        length: f64,
        width: f64,
        horizontal_scale: f64,
        rows: usize,
        cols: usize,
    },

    /// The extents at this resolution need more cells than can be addressed.
    #[error("terrain {length} x {width} m at {horizontal_scale} m/cell needs too many cells")]
    GridTooLarge {
        length: f64,
        width: f64,
        horizontal_scale: f64,
    },

    /// A kernel radius spans more cells than a `d x d` kernel can hold.
    #[error("kernel radius {radius} m at {horizontal_scale} m/cell is too large")]
    KernelTooLarge { radius: f64, horizontal_scale: f64 },

    /// Rock coverage fraction outside `(0, 1]`.
    #[error("rock coverage fraction must lie in (0, 1], got {0}")]
    InvalidCoverage(f64),

    /// Height range with `min > max` or non-finite bounds.
    #[error("invalid height range {min}..={max}")]
    InvalidHeightRange { min: f64, max: f64 },

    /// A raw buffer did not match the declared grid shape.
    #[error("height buffer holds {actual} samples, expected {rows}x{cols}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        actual: usize,
    },
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64, TerrainError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TerrainError::NonPositive { name, value })
    }
}

pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64, TerrainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TerrainError::Negative { name, value })
    }
}
