//! Triangle mesh built from a heightfield grid.

use glam::Vec3;
use regolith_terrain::HeightField;
use tracing::debug;

use crate::error::MeshError;
use crate::sink::{TriangleMeshParams, TriangleMeshSink};
use crate::slope::{VertexShift, vertical_face_shifts};

/// Vertex and index buffers for a heightfield surface.
///
/// Vertex `r * cols + c` corresponds to grid sample `(r, c)`; every grid cell
/// contributes two triangles.
#[derive(Clone, Debug, PartialEq)]
pub struct TriMesh {
    vertices: Vec<[f32; 3]>,
    triangles: Vec<[u32; 3]>,
    horizontal_scale: f64,
    vertical_scale: f64,
}

impl TriMesh {
    /// Vertex positions in meters.
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Vertex-index triples.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Vertex buffer as consecutive `x, y, z` floats.
    pub fn flat_vertices(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as consecutive vertex indices, three per triangle.
    pub fn flat_triangles(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn horizontal_scale(&self) -> f64 {
        self.horizontal_scale
    }

    pub fn vertical_scale(&self) -> f64 {
        self.vertical_scale
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|&v| Vec3::from_array(v));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Default contact parameters sized for this mesh.
    pub fn params(&self) -> TriangleMeshParams {
        TriangleMeshParams {
            nb_vertices: self.vertex_count(),
            nb_triangles: self.triangle_count(),
            ..Default::default()
        }
    }

    /// Pass the flat buffers to `sink`, placed at `translation`.
    pub fn submit<S: TriangleMeshSink + ?Sized>(
        &self,
        sink: &mut S,
        translation: Vec3,
    ) -> Result<(), S::Error> {
        let params = TriangleMeshParams {
            translation,
            ..self.params()
        };
        sink.add_triangle_mesh(self.flat_vertices(), self.flat_triangles(), &params)
    }
}

/// Convert a heightfield into a two-triangles-per-cell surface mesh.
///
/// Vertex `(r, c)` sits at `x = r * horizontal_scale`,
/// `y = c * horizontal_scale`, `z = raw * vertical_scale`. Each cell with
/// corners `i0 = (r, c)`, `i1 = (r, c+1)`, `i2 = (r+1, c)`, `i3 = (r+1, c+1)`
/// emits `(i0, i3, i1)` then `(i0, i2, i3)`.
///
/// With `Some(threshold)`, edges steeper than the threshold become vertical
/// faces; see [`crate::slope`]. With `None`, every vertex stays on the regular
/// horizontal grid.
///
/// # Errors
///
/// Returns [`MeshError::InvalidSlopeThreshold`] for a negative or non-finite
/// threshold and [`MeshError::TooManyVertices`] if indices overflow `u32`.
pub fn convert_heightfield_to_trimesh(
    hf: &HeightField,
    slope_threshold: Option<f64>,
) -> Result<TriMesh, MeshError> {
    let rows = hf.num_rows();
    let cols = hf.num_cols();
    if u32::try_from(rows * cols).is_err() {
        return Err(MeshError::TooManyVertices { rows, cols });
    }

    let shifts = match slope_threshold {
        Some(threshold) => Some(vertical_face_shifts(hf, threshold)?),
        None => None,
    };

    let hs = hf.horizontal_scale();
    let vs = hf.vertical_scale();
    let raw = hf.as_slice();

    let mut vertices = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let i = r * cols + c;
            let shift = shifts.as_ref().map_or(VertexShift::default(), |s| s[i]);
            vertices.push([
                ((r as f64 + f64::from(shift.rows)) * hs) as f32,
                ((c as f64 + f64::from(shift.cols)) * hs) as f32,
                (raw[i] * vs) as f32,
            ]);
        }
    }

    let cells = rows.saturating_sub(1) * cols.saturating_sub(1);
    let mut triangles = Vec::with_capacity(2 * cells);
    let stride = cols as u32;
    for r in 0..rows.saturating_sub(1) as u32 {
        for c in 0..cols.saturating_sub(1) as u32 {
            let i0 = r * stride + c;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            triangles.push([i0, i3, i1]);
            triangles.push([i0, i2, i3]);
        }
    }

    let shifted = shifts
        .as_ref()
        .map_or(0, |s| s.iter().filter(|v| **v != VertexShift::default()).count());
    debug!(
        rows,
        cols,
        vertices = vertices.len(),
        triangles = triangles.len(),
        shifted,
        "heightfield meshed"
    );

    Ok(TriMesh {
        vertices,
        triangles,
        horizontal_scale: hs,
        vertical_scale: vs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(rows: usize, cols: usize, hs: f64, vs: f64) -> HeightField {
        HeightField::from_raw(rows, cols, hs, vs, vec![0.0; rows * cols]).unwrap()
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<(usize, usize, TriangleMeshParams)>,
    }

    impl TriangleMeshSink for RecordingSink {
        type Error = std::convert::Infallible;

        fn add_triangle_mesh(
            &mut self,
            vertices: &[f32],
            triangles: &[u32],
            params: &TriangleMeshParams,
        ) -> Result<(), Self::Error> {
            self.calls.push((vertices.len(), triangles.len(), *params));
            Ok(())
        }
    }

    #[test]
    fn test_flat_4x4_scenario() {
        let mesh = convert_heightfield_to_trimesh(&flat(4, 4, 1.0, 1.0), None).unwrap();
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 18);
        assert!(mesh.vertices().iter().all(|v| v[2] == 0.0));
        assert_eq!(mesh.vertices()[0], [0.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices()[15], [3.0, 3.0, 0.0]);
    }

    #[test]
    fn test_counts_for_various_shapes() {
        for (rows, cols) in [(2, 2), (2, 5), (7, 3), (10, 10), (33, 17)] {
            let mesh = convert_heightfield_to_trimesh(&flat(rows, cols, 0.1, 0.005), None).unwrap();
            assert_eq!(mesh.vertex_count(), rows * cols);
            assert_eq!(mesh.triangle_count(), 2 * (rows - 1) * (cols - 1));
            assert_eq!(mesh.flat_vertices().len(), 3 * rows * cols);
            assert_eq!(mesh.flat_triangles().len(), 6 * (rows - 1) * (cols - 1));
        }
    }

    #[test]
    fn test_single_row_has_no_triangles() {
        let mesh = convert_heightfield_to_trimesh(&flat(1, 5, 1.0, 1.0), None).unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_triangle_winding_pattern() {
        let mesh = convert_heightfield_to_trimesh(&flat(3, 3, 1.0, 1.0), None).unwrap();
        let tris = mesh.triangles();
        assert_eq!(tris[0], [0, 4, 1]);
        assert_eq!(tris[1], [0, 3, 4]);
        assert_eq!(tris[2], [1, 5, 2]);
        assert_eq!(tris[3], [1, 4, 5]);
        assert_eq!(tris[4], [3, 7, 4]);
        assert_eq!(tris[7], [4, 7, 8]);
        assert_eq!(&mesh.flat_triangles()[..6], &[0, 4, 1, 0, 3, 4]);
    }

    #[test]
    fn test_vertices_on_regular_grid_without_threshold() {
        let raw: Vec<f64> = (0..30).map(|i| ((i * 37) % 11) as f64 * 50.0).collect();
        let hf = HeightField::from_raw(5, 6, 0.1, 0.005, raw.clone()).unwrap();
        let mesh = convert_heightfield_to_trimesh(&hf, None).unwrap();
        for r in 0..5 {
            for c in 0..6 {
                let v = mesh.vertices()[r * 6 + c];
                assert_eq!(v[0], (r as f64 * 0.1) as f32);
                assert_eq!(v[1], (c as f64 * 0.1) as f32);
                assert_eq!(v[2], (raw[r * 6 + c] * 0.005) as f32);
            }
        }
    }

    #[test]
    fn test_zero_threshold_on_flat_field_matches_uncorrected() {
        let hf = flat(6, 6, 0.1, 0.005);
        let plain = convert_heightfield_to_trimesh(&hf, None).unwrap();
        let corrected = convert_heightfield_to_trimesh(&hf, Some(0.0)).unwrap();
        assert_eq!(plain, corrected);
    }

    #[test]
    fn test_spike_produces_vertical_walls() {
        #[rustfmt::skip]
        let hf = HeightField::from_raw(3, 3, 2.0, 0.5, vec![
            0.0, 0.0, 0.0,
            0.0, 100.0, 0.0,
            0.0, 0.0, 0.0,
        ]).unwrap();
        let mesh = convert_heightfield_to_trimesh(&hf, Some(1.0)).unwrap();
        let v = mesh.vertices();
        // Every lowered neighbour on the row/column/main-diagonal lines slides
        // under the spike at (2, 2) meters.
        assert_eq!(v[1], [2.0, 2.0, 0.0]);
        assert_eq!(v[7], [2.0, 2.0, 0.0]);
        assert_eq!(v[3], [2.0, 2.0, 0.0]);
        assert_eq!(v[5], [2.0, 2.0, 0.0]);
        assert_eq!(v[0], [2.0, 2.0, 0.0]);
        assert_eq!(v[8], [2.0, 2.0, 0.0]);
        assert_eq!(v[4], [2.0, 2.0, 50.0]);
        // Anti-diagonal corners are untouched.
        assert_eq!(v[2], [0.0, 4.0, 0.0]);
        assert_eq!(v[6], [4.0, 0.0, 0.0]);
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let hf = flat(2, 2, 1.0, 1.0);
        assert_eq!(
            convert_heightfield_to_trimesh(&hf, Some(-1.0)),
            Err(MeshError::InvalidSlopeThreshold(-1.0))
        );
    }

    #[test]
    fn test_bounds() {
        let hf = HeightField::from_raw(2, 3, 0.5, 0.01, vec![0.0, -100.0, 0.0, 0.0, 300.0, 0.0])
            .unwrap();
        let mesh = convert_heightfield_to_trimesh(&hf, None).unwrap();
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(hi, Vec3::new(0.5, 1.0, 3.0));
    }

    #[test]
    fn test_submit_passes_flat_buffers_and_placement() {
        let mesh = convert_heightfield_to_trimesh(&flat(4, 5, 1.0, 1.0), None).unwrap();
        let mut sink = RecordingSink::default();
        mesh.submit(&mut sink, Vec3::new(-1.0, -1.0, 0.0)).unwrap();

        assert_eq!(sink.calls.len(), 1);
        let (nv, nt, params) = sink.calls[0];
        assert_eq!(nv, 60);
        assert_eq!(nt, 72);
        assert_eq!(params.nb_vertices, 20);
        assert_eq!(params.nb_triangles, 24);
        assert_eq!(params.translation, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(params.static_friction, 1.0);
    }
}
