//! GPU buffer wrappers

pub mod camera_buffer;
pub mod light_buffer;
pub mod mesh_buffer;

pub use camera_buffer::CameraBuffer;
pub use light_buffer::LightBuffer;
pub use mesh_buffer::MeshBuffer;
