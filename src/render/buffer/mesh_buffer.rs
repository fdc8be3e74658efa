//! GPU vertex buffers built from CPU mesh data

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::mesh::{MeshVertex, TriangleMesh};

/// Vertex buffer plus the count needed to draw it
pub struct MeshBuffer {
    pub buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl MeshBuffer {
    /// Upload a triangle mesh with a uniform surface color
    pub fn from_mesh(
        device: &wgpu::Device,
        label: &str,
        mesh: &TriangleMesh,
        color: Vec3,
    ) -> Self {
        let vertices: Vec<MeshVertex> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .map(|(position, normal)| MeshVertex {
                position: position.to_array(),
                normal: normal.to_array(),
                color: color.to_array(),
            })
            .collect();

        Self::from_vertices(device, label, &vertices)
    }

    /// Upload a line list with a uniform color; lines are unlit so the
    /// normal just points up
    pub fn from_line_points(
        device: &wgpu::Device,
        label: &str,
        points: &[Vec3],
        color: Vec3,
    ) -> Self {
        let vertices: Vec<MeshVertex> = points
            .iter()
            .map(|position| MeshVertex {
                position: position.to_array(),
                normal: [0.0, 1.0, 0.0],
                color: color.to_array(),
            })
            .collect();

        Self::from_vertices(device, label, &vertices)
    }

    fn from_vertices(device: &wgpu::Device, label: &str, vertices: &[MeshVertex]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }
}
