//! A stand-in collision scene that checks and tallies submitted meshes.

use regolith_mesh::{TriangleMeshParams, TriangleMeshSink};
use tracing::debug;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("{buffer} buffer holds {actual} values, expected {expected}")]
    BufferMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Default)]
pub struct SceneSummary {
    meshes: usize,
    vertices: usize,
    triangles: usize,
}

impl SceneSummary {
    pub fn mesh_count(&self) -> usize {
        self.meshes
    }

    pub fn total_vertices(&self) -> usize {
        self.vertices
    }

    pub fn total_triangles(&self) -> usize {
        self.triangles
    }
}

impl TriangleMeshSink for SceneSummary {
    type Error = SinkError;

    fn add_triangle_mesh(
        &mut self,
        vertices: &[f32],
        triangles: &[u32],
        params: &TriangleMeshParams,
    ) -> Result<(), SinkError> {
        if vertices.len() != params.nb_vertices * 3 {
            return Err(SinkError::BufferMismatch {
                buffer: "vertex",
                expected: params.nb_vertices * 3,
                actual: vertices.len(),
            });
        }
        if triangles.len() != params.nb_triangles * 3 {
            return Err(SinkError::BufferMismatch {
                buffer: "index",
                expected: params.nb_triangles * 3,
                actual: triangles.len(),
            });
        }

        debug!(
            "Static mesh at {}: {} vertices, {} triangles, friction {}/{}",
            params.translation,
            params.nb_vertices,
            params.nb_triangles,
            params.static_friction,
            params.dynamic_friction
        );
        self.meshes += 1;
        self.vertices += params.nb_vertices;
        self.triangles += params.nb_triangles;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_index_buffer() {
        let mut scene = SceneSummary::default();
        let params = TriangleMeshParams {
            nb_vertices: 1,
            nb_triangles: 1,
            ..Default::default()
        };
        let err = scene
            .add_triangle_mesh(&[0.0, 0.0, 0.0], &[0, 0], &params)
            .unwrap_err();
        assert_eq!(
            err,
            SinkError::BufferMismatch {
                buffer: "index",
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(scene.mesh_count(), 0);
    }

    #[test]
    fn test_tallies_accepted_meshes() {
        let mut scene = SceneSummary::default();
        let params = TriangleMeshParams {
            nb_vertices: 3,
            nb_triangles: 1,
            ..Default::default()
        };
        let vertices = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        scene.add_triangle_mesh(&vertices, &[0, 1, 2], &params).unwrap();
        scene.add_triangle_mesh(&vertices, &[0, 2, 1], &params).unwrap();
        assert_eq!(scene.mesh_count(), 2);
        assert_eq!(scene.total_triangles(), 2);
        assert_eq!(scene.total_vertices(), 6);
    }
}
