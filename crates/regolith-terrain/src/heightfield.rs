//! Row-major grid of raw height samples.

use crate::error::{TerrainError, ensure_positive};

/// A rectangular grid of raw height samples.
///
/// Samples are stored row-major and expressed in units of `vertical_scale`
/// meters; cells are `horizontal_scale` meters apart. Synthesis only ever adds
/// to samples, so overlapping stamps accumulate.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    num_rows: usize,
    num_cols: usize,
    horizontal_scale: f64,
    vertical_scale: f64,
    raw: Vec<f64>,
}

impl HeightField {
    pub(crate) fn zeros(
        num_rows: usize,
        num_cols: usize,
        horizontal_scale: f64,
        vertical_scale: f64,
    ) -> Self {
        Self {
            num_rows,
            num_cols,
            horizontal_scale,
            vertical_scale,
            raw: vec![0.0; num_rows * num_cols],
        }
    }

    /// Wrap an existing row-major buffer of raw samples.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::ShapeMismatch`] if `raw.len() != rows * cols` and
    /// [`TerrainError::NonPositive`] for a bad scale.
    pub fn from_raw(
        num_rows: usize,
        num_cols: usize,
        horizontal_scale: f64,
        vertical_scale: f64,
        raw: Vec<f64>,
    ) -> Result<Self, TerrainError> {
        let horizontal_scale = ensure_positive("horizontal_scale", horizontal_scale)?;
        let vertical_scale = ensure_positive("vertical_scale", vertical_scale)?;
        if raw.len() != num_rows * num_cols {
            return Err(TerrainError::ShapeMismatch {
                rows: num_rows,
                cols: num_cols,
                actual: raw.len(),
            });
        }
        Ok(Self {
            num_rows,
            num_cols,
            horizontal_scale,
            vertical_scale,
            raw,
        })
    }

    /// Build a heightfield from a signed 16-bit buffer, as consumed by physics
    /// heightfield APIs.
    pub fn from_quantized(
        num_rows: usize,
        num_cols: usize,
        horizontal_scale: f64,
        vertical_scale: f64,
        samples: &[i16],
    ) -> Result<Self, TerrainError> {
        let raw = samples.iter().map(|&s| f64::from(s)).collect();
        Self::from_raw(num_rows, num_cols, horizontal_scale, vertical_scale, raw)
    }

    /// Truncate every sample toward zero and saturate it into `i16`.
    ///
    /// NaN samples become 0.
    pub fn to_quantized(&self) -> Vec<i16> {
        self.raw.iter().map(|&h| h as i16).collect()
    }

    /// Return a copy whose samples have been through [`Self::to_quantized`].
    pub fn quantize(&self) -> Self {
        Self {
            raw: self.raw.iter().map(|&h| f64::from(h as i16)).collect(),
            ..self.clone()
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn horizontal_scale(&self) -> f64 {
        self.horizontal_scale
    }

    pub fn vertical_scale(&self) -> f64 {
        self.vertical_scale
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Raw sample at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.num_rows && col < self.num_cols {
            Some(self.raw[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// One row of raw samples.
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows`.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.num_cols;
        &self.raw[start..start + self.num_cols]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.num_cols;
        &mut self.raw[start..start + self.num_cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.raw
    }

    /// Smallest and largest raw sample.
    pub fn min_max(&self) -> (f64, f64) {
        self.raw
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }

    /// Height of sample `(row, col)` in meters.
    pub fn height_m(&self, row: usize, col: usize) -> Option<f64> {
        self.get(row, col).map(|h| h * self.vertical_scale)
    }
}
