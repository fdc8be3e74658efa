//! CPU-side mesh data and primitive tessellation

pub mod vertex;
pub mod cylinder;

pub use vertex::MeshVertex;

use glam::Vec3;

/// Triangle soup with matching per-vertex normals.
///
/// Positions and normals always have the same length, a multiple of 3.
#[derive(Clone, Debug, Default)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl TriangleMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for `vertices` entries
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
        }
    }

    /// Append a single vertex
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) {
        self.positions.push(position);
        self.normals.push(normal);
    }

    /// Append one triangle with a shared flat normal
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, normal: Vec3) {
        self.push_vertex(a, normal);
        self.push_vertex(b, normal);
        self.push_vertex(c, normal);
    }

    /// Number of vertices in the mesh
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Whether the mesh has no geometry
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_triangle() {
        let mut mesh = TriangleMesh::new();
        assert!(mesh.is_empty());

        mesh.push_triangle(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.normals, vec![Vec3::Z; 3]);
    }
}
