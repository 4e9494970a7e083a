//! Hand-off of finished meshes to a physics or render backend.

use glam::Vec3;

/// Placement and contact properties for a static triangle mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleMeshParams {
    /// Number of vertices in the flat vertex buffer (buffer length / 3).
    pub nb_vertices: usize,
    /// Number of triangles in the flat index buffer (buffer length / 3).
    pub nb_triangles: usize,
    /// World-space translation applied to the mesh.
    pub translation: Vec3,
    pub static_friction: f32,
    pub dynamic_friction: f32,
    pub restitution: f32,
}

impl Default for TriangleMeshParams {
    fn default() -> Self {
        Self {
            nb_vertices: 0,
            nb_triangles: 0,
            translation: Vec3::ZERO,
            static_friction: 1.0,
            dynamic_friction: 1.0,
            restitution: 0.0,
        }
    }
}

/// A backend that accepts static triangle meshes, such as a physics scene
/// adding a collision mesh or a renderer uploading terrain geometry.
///
/// `vertices` holds `x, y, z` triples and `triangles` holds vertex-index
/// triples.
pub trait TriangleMeshSink {
    type Error;

    fn add_triangle_mesh(
        &mut self,
        vertices: &[f32],
        triangles: &[u32],
        params: &TriangleMeshParams,
    ) -> Result<(), Self::Error>;
}
