//! GPU uniform buffer for lighting data

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::scene;

/// Lighting uniform data for GPU (must match shader struct exactly)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightUniform {
    /// Direction the light travels, normalized (12 bytes, offset 0)
    pub direction: [f32; 3],
    pub _pad0: f32,
    /// Directional light color (12 bytes, offset 16)
    pub color: [f32; 3],
    pub _pad1: f32,
    /// Ambient term (12 bytes, offset 32)
    pub ambient: [f32; 3],
    pub _pad2: f32,
}

impl Default for LightUniform {
    fn default() -> Self {
        Self {
            direction: (-scene::SUN_POSITION.normalize()).to_array(),
            _pad0: 0.0,
            color: [1.0, 1.0, 1.0],
            _pad1: 0.0,
            ambient: scene::AMBIENT_LIGHT.to_array(),
            _pad2: 0.0,
        }
    }
}

/// GPU buffer for lighting uniform
pub struct LightBuffer {
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl LightBuffer {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("light_uniform"),
            size: std::mem::size_of::<LightUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("light_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("light_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group_layout,
            bind_group,
        }
    }

    /// Upload the current lighting parameters
    pub fn update(&self, queue: &wgpu::Queue, uniform: &LightUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniform));
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
