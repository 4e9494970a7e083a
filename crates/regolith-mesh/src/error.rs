//! Mesh conversion error types.

/// Errors that can occur while converting a heightfield to a mesh.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// The slope threshold was negative, NaN or infinite.
    #[error("slope threshold must be finite and non-negative, got {0}")]
    InvalidSlopeThreshold(f64),

    /// The grid has more vertices than a `u32` index can address.
    #[error("{rows}x{cols} grid exceeds the u32 vertex index range")]
    TooManyVertices { rows: usize, cols: usize },
}
