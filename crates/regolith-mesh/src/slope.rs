//! Vertical-face correction for steep heightfield edges.
//!
//! A regular grid turns a cliff into a long ramp spanning a whole cell. When a
//! neighbour rises above the slope threshold, the lower vertex is slid one cell
//! towards it so the two share a horizontal position and the edge becomes a
//! wall:
//!
//! ```text
//!            B                      B
//!           /|                      |
//!          / |          ->          |
//!         /  |                      |
//!        A---+                  ----A'
//! ```
//!
//! Shifts are computed per axis. Along rows, a vertex moves `+1` when the next
//! row is higher by more than the threshold and `-1` when the previous row is;
//! both together cancel. Columns work the same way. A third shift follows the
//! main diagonal (`(r+1, c+1)` and `(r-1, c-1)`) and is applied to an axis
//! only where that axis has no shift of its own, so a vertex that already moved
//! along an axis is never moved twice along it.

use regolith_terrain::HeightField;

use crate::error::MeshError;

/// Horizontal displacement of one vertex, in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexShift {
    /// Shift along the row (x) axis.
    pub rows: i8,
    /// Shift along the column (y) axis.
    pub cols: i8,
}

/// Compute the per-vertex shifts that turn slopes steeper than
/// `slope_threshold` (rise over run, meters per meter) into vertical faces.
///
/// The comparison is strict: a height difference exactly at the threshold is
/// left alone, so a flat field never moves even with a threshold of 0.
///
/// # Errors
///
/// Returns [`MeshError::InvalidSlopeThreshold`] for a negative or non-finite
/// threshold.
pub fn vertical_face_shifts(
    hf: &HeightField,
    slope_threshold: f64,
) -> Result<Vec<VertexShift>, MeshError> {
    if !(slope_threshold.is_finite() && slope_threshold >= 0.0) {
        return Err(MeshError::InvalidSlopeThreshold(slope_threshold));
    }

    // Threshold in raw height units per cell.
    let threshold = slope_threshold * hf.horizontal_scale() / hf.vertical_scale();
    let rows = hf.num_rows();
    let cols = hf.num_cols();
    let h = hf.as_slice();
    let steeper = |from: usize, to: usize| h[to] - h[from] > threshold;

    let mut shifts = Vec::with_capacity(h.len());
    for r in 0..rows {
        for c in 0..cols {
            let i = r * cols + c;
            let mut along_rows = 0_i8;
            let mut along_cols = 0_i8;
            let mut corner = 0_i8;

            if r + 1 < rows && steeper(i, i + cols) {
                along_rows += 1;
            }
            if r > 0 && steeper(i, i - cols) {
                along_rows -= 1;
            }
            if c + 1 < cols && steeper(i, i + 1) {
                along_cols += 1;
            }
            if c > 0 && steeper(i, i - 1) {
                along_cols -= 1;
            }
            if r + 1 < rows && c + 1 < cols && steeper(i, i + cols + 1) {
                corner += 1;
            }
            if r > 0 && c > 0 && steeper(i, i - cols - 1) {
                corner -= 1;
            }

            shifts.push(VertexShift {
                rows: if along_rows == 0 { corner } else { along_rows },
                cols: if along_cols == 0 { corner } else { along_cols },
            });
        }
    }

    Ok(shifts)
}
