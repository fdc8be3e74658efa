//! Render pipelines

pub mod mesh;

pub use mesh::MeshPipeline;
