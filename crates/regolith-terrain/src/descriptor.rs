//! Terrain descriptors and the terrain patch that owns a heightfield.

use crate::error::{TerrainError, ensure_positive};
use crate::heightfield::HeightField;

/// Logical extent and resolution of a terrain patch.
///
/// Rows run along the `width` axis and columns along the `length` axis, each
/// sampled every `horizontal_scale` meters. Raw heights are expressed in units
/// of `vertical_scale` meters.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainDescriptor {
    name: String,
    length: f64,
    width: f64,
    horizontal_scale: f64,
    vertical_scale: f64,
    num_rows: usize,
    num_cols: usize,
}

impl TerrainDescriptor {
    /// Validate the extents and scales and derive the grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::NonPositive`] for a non-positive or non-finite
    /// extent or scale, [`TerrainError::EmptyGrid`] when rounding leaves no
    /// rows or columns, and [`TerrainError::GridTooLarge`] when the cell count
    /// does not fit in `usize`.
    pub fn new(
        name: impl Into<String>,
        length: f64,
        width: f64,
        horizontal_scale: f64,
        vertical_scale: f64,
    ) -> Result<Self, TerrainError> {
        let length = ensure_positive("length", length)?;
        let width = ensure_positive("width", width)?;
        let horizontal_scale = ensure_positive("horizontal_scale", horizontal_scale)?;
        let vertical_scale = ensure_positive("vertical_scale", vertical_scale)?;

        let too_large = TerrainError::GridTooLarge {
            length,
            width,
            horizontal_scale,
        };
        let (Some(num_rows), Some(num_cols)) = (
            cell_count(width, horizontal_scale),
            cell_count(length, horizontal_scale),
        ) else {
            return Err(too_large);
        };
        if num_rows.checked_mul(num_cols).is_none() {
            return Err(too_large);
        }
        if num_rows == 0 || num_cols == 0 {
            return Err(TerrainError::EmptyGrid {
                length,
                width,
                horizontal_scale,
                rows: num_rows,
                cols: num_cols,
            });
        }

        Ok(Self {
            name: name.into(),
            length,
            width,
            horizontal_scale,
            vertical_scale,
            num_rows,
            num_cols,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extent along the column axis, in meters.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Extent along the row axis, in meters.
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn horizontal_scale(&self) -> f64 {
        self.horizontal_scale
    }

    pub fn vertical_scale(&self) -> f64 {
        self.vertical_scale
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Ground area in square meters (`length * width`).
    pub fn area(&self) -> f64 {
        self.length * self.width
    }
}

/// A named terrain patch: its descriptor plus the heightfield being built.
#[derive(Clone, Debug)]
pub struct Terrain {
    descriptor: TerrainDescriptor,
    height_field: HeightField,
}

impl Terrain {
    /// Create a flat (all-zero) terrain for the descriptor.
    pub fn new(descriptor: TerrainDescriptor) -> Self {
        let height_field = HeightField::zeros(
            descriptor.num_rows(),
            descriptor.num_cols(),
            descriptor.horizontal_scale(),
            descriptor.vertical_scale(),
        );
        Self {
            descriptor,
            height_field,
        }
    }

    pub fn descriptor(&self) -> &TerrainDescriptor {
        &self.descriptor
    }

    pub fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    pub fn height_field_mut(&mut self) -> &mut HeightField {
        &mut self.height_field
    }

    /// Hand the finished heightfield over to its consumer.
    pub fn into_height_field(self) -> HeightField {
        self.height_field
    }
}

/// Whole cells covering `extent`, or `None` if the count overflows `usize`.
fn cell_count(extent: f64, horizontal_scale: f64) -> Option<usize> {
    let cells = (extent / horizontal_scale).round();
    (cells.is_finite() && cells < usize::MAX as f64).then_some(cells as usize)
}
