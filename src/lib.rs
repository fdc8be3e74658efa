//! Arbor - Procedural tree viewer
//!
//! Generates recursive branching trees from a seed and renders them with
//! wgpu. Geometry generation is pure data and can be used without a GPU.

pub mod core;
pub mod generation;
pub mod mesh;
pub mod render;
pub mod scene;
