//! Heightfield to triangle-mesh conversion with optional vertical-face
//! correction, and the hand-off to physics or render backends.

pub mod error;
pub mod sink;
pub mod slope;
pub mod trimesh;

pub use error::MeshError;
pub use sink::{TriangleMeshParams, TriangleMeshSink};
pub use slope::{VertexShift, vertical_face_shifts};
pub use trimesh::{TriMesh, convert_heightfield_to_trimesh};
